//! Site configuration: API base, page throttle, HTTP timeouts, and proxy.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Public ArtStation origin.
pub const DEFAULT_BASE_URL: &str = "https://www.artstation.com";

/// Delay applied after every page fetch, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 200;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;
const MAX_PAGE_DELAY_MS: u64 = 60_000;

/// Invalid configuration value.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting fell outside its accepted range.
    #[error("invalid config value for `{field}`: {value}. Expected range: {min}..={max}")]
    OutOfRange {
        /// Setting name.
        field: &'static str,
        /// Rejected value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// The base URL is empty or not http(s).
    #[error("invalid base URL: {url}")]
    InvalidBaseUrl {
        /// Rejected base URL.
        url: String,
    },
}

/// Proxy addresses for plain and TLS traffic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyConfig {
    /// Proxy used for `http://` requests.
    pub http: String,
    /// Proxy used for `https://` requests.
    pub https: String,
}

impl ProxyConfig {
    /// Routes both schemes through one proxy address.
    #[must_use]
    pub fn single(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        Self {
            http: addr.clone(),
            https: addr,
        }
    }
}

/// Settings shared by the transports and the task stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site origin without trailing slash, e.g. `https://www.artstation.com`.
    pub base_url: String,
    /// Throttle applied after each page fetch.
    pub page_delay_ms: u64,
    /// Direct transport connect timeout.
    pub connect_timeout_secs: u64,
    /// Direct transport whole-request timeout.
    pub read_timeout_secs: u64,
    /// Optional proxy for the direct transport.
    pub proxy: Option<ProxyConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            proxy: None,
        }
    }
}

impl SiteConfig {
    /// Default settings pointed at another origin (mock servers, mirrors).
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Validates values against runtime constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unusable base URL or an out-of-range value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.normalized_base_url();
        if !(base.starts_with("http://") || base.starts_with("https://"))
            || url::Url::parse(base).is_err()
        {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
            });
        }
        check_range("page_delay_ms", self.page_delay_ms, 0, MAX_PAGE_DELAY_MS)?;
        check_range("connect_timeout_secs", self.connect_timeout_secs, 1, 3600)?;
        check_range("read_timeout_secs", self.read_timeout_secs, 1, 3600)?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SiteConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.page_delay(), Duration::from_millis(200));
        assert!(config.proxy.is_none());
    }

    #[test]
    fn test_normalized_base_url_strips_trailing_slash() {
        let config = SiteConfig::with_base_url("https://www.artstation.com/");
        assert_eq!(config.normalized_base_url(), "https://www.artstation.com");
    }

    #[test]
    fn test_validate_rejects_non_http_base() {
        let config = SiteConfig::with_base_url("ftp://example.com");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = SiteConfig {
            connect_timeout_secs: 0,
            ..SiteConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("connect_timeout_secs"), "{err}");
    }

    #[test]
    fn test_validate_rejects_excessive_page_delay() {
        let config = SiteConfig {
            page_delay_ms: 60_001,
            ..SiteConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_proxy_single_sets_both_schemes() {
        let proxy = ProxyConfig::single("http://127.0.0.1:1080");
        assert_eq!(proxy.http, "http://127.0.0.1:1080");
        assert_eq!(proxy.https, "http://127.0.0.1:1080");
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: SiteConfig =
            serde_json::from_str(r#"{"page_delay_ms": 0, "proxy": {"http": "a", "https": "b"}}"#)
                .unwrap();
        assert_eq!(config.page_delay_ms, 0);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.proxy.unwrap().https, "b");
    }
}
