//! HTTP client construction policy for the direct transport.
//!
//! Centralizes timeout, user-agent, compression, and proxy defaults.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Proxy};
use tracing::warn;

use crate::config::{ProxyConfig, SiteConfig};

use super::TransportError;

/// Builds the direct-transport HTTP client from site settings.
///
/// # Errors
///
/// Returns [`TransportError::Client`] for an unusable proxy address or when
/// client construction fails.
pub(super) fn build_http_client(
    config: &SiteConfig,
    user_agent: &str,
) -> Result<Client, TransportError> {
    match try_build_client(config, user_agent, false) {
        Ok(client) => Ok(client),
        Err(BuildClientFailure::Panic) => {
            // Some sandboxed environments panic when querying system proxy
            // settings; retry without the system lookup.
            warn!("HTTP client hit system proxy panic; building without system proxy lookup");
            match try_build_client(config, user_agent, true) {
                Ok(client) => Ok(client),
                Err(BuildClientFailure::Panic) => Err(TransportError::client(
                    "HTTP client construction panicked while reading proxy settings",
                )),
                Err(BuildClientFailure::Build(error)) => Err(TransportError::client(error)),
            }
        }
        Err(BuildClientFailure::Build(error)) => Err(TransportError::client(error)),
    }
}

enum BuildClientFailure {
    Panic,
    Build(String),
}

fn try_build_client(
    config: &SiteConfig,
    user_agent: &str,
    disable_system_proxy_lookup: bool,
) -> Result<Client, BuildClientFailure> {
    catch_unwind(AssertUnwindSafe(move || {
        let mut builder = base_builder(config, user_agent);
        if disable_system_proxy_lookup {
            builder = builder.no_proxy();
        }
        if let Some(proxy) = &config.proxy {
            builder = apply_proxy(builder, proxy).map_err(BuildClientFailure::Build)?;
        }
        builder
            .build()
            .map_err(|error| BuildClientFailure::Build(error.to_string()))
    }))
    .map_err(|_| BuildClientFailure::Panic)?
}

fn base_builder(config: &SiteConfig, user_agent: &str) -> ClientBuilder {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.read_timeout_secs))
        .user_agent(user_agent)
        .gzip(true)
}

fn apply_proxy(builder: ClientBuilder, proxy: &ProxyConfig) -> Result<ClientBuilder, String> {
    let http = Proxy::http(&proxy.http)
        .map_err(|error| format!("invalid http proxy {}: {error}", proxy.http))?;
    let https = Proxy::https(&proxy.https)
        .map_err(|error| format!("invalid https proxy {}: {error}", proxy.https))?;
    Ok(builder.proxy(http).proxy(https))
}
