//! CLI argument definitions using clap derive macros.

use clap::Parser;

use artstation_core::ProxyConfig;
use artstation_core::config::DEFAULT_PAGE_DELAY_MS;

/// List every image in an ArtStation portfolio.
///
/// Walks the profile's root works and albums and prints one JSON line per
/// image (`{"url": ..., "album": ...}`) to stdout.
#[derive(Parser, Debug)]
#[command(name = "artstation-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Profile URL, e.g. https://www.artstation.com/someone
    pub profile_url: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Proxy for both http and https traffic
    #[arg(long, conflicts_with_all = ["http_proxy", "https_proxy"])]
    pub proxy: Option<String>,

    /// Proxy for http traffic (requires --https-proxy)
    #[arg(long, requires = "https_proxy")]
    pub http_proxy: Option<String>,

    /// Proxy for https traffic (requires --http-proxy)
    #[arg(long, requires = "http_proxy")]
    pub https_proxy: Option<String>,

    /// Delay after every listing page in milliseconds (0 to disable, max 60000)
    #[arg(long, default_value_t = DEFAULT_PAGE_DELAY_MS, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub page_delay_ms: u64,
}

impl Args {
    /// Proxy settings assembled from the proxy flags.
    #[must_use]
    pub fn proxy_config(&self) -> Option<ProxyConfig> {
        if let Some(addr) = &self.proxy {
            return Some(ProxyConfig::single(addr.clone()));
        }
        match (&self.http_proxy, &self.https_proxy) {
            (Some(http), Some(https)) => Some(ProxyConfig {
                http: http.clone(),
                https: https.clone(),
            }),
            _ => None,
        }
    }
}
