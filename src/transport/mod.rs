//! Fetch strategies used by discovery.
//!
//! Discovery only ever sees the [`Transport`] trait. Two strategies implement it:
//!
//! - [`DirectTransport`] - plain HTTP GET with a fixed user agent and optional proxy
//! - [`RelayedTransport`] - forwards each URL to a live browser session
//!   ([`RelaySession`]) and returns whatever the browser fetched
//!
//! # Example
//!
//! ```no_run
//! use artstation_core::transport::{DirectTransport, Transport};
//! use artstation_core::SiteConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = DirectTransport::new(&SiteConfig::default())?;
//! let payload = transport
//!     .request("https://www.artstation.com/users/someone/projects.json?page=1")
//!     .await?;
//! println!("{}", payload.into_text());
//! # Ok(())
//! # }
//! ```

mod direct;
mod error;
mod http_client;
mod relay;

pub use direct::DirectTransport;
pub use error::TransportError;
pub use relay::{BrowserRelay, RelayRequest, RelaySession, RelayedTransport};

use async_trait::async_trait;
use serde_json::Value;

/// Body returned by a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Body parsed as JSON.
    Json(Value),
    /// Body that was not JSON (relay only), e.g. an interstitial HTML page.
    Text(String),
}

impl Payload {
    /// Renders the payload as text; JSON is re-serialized.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Json(value) => value.to_string(),
            Self::Text(text) => text,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

/// Request/response primitive shared by both fetch strategies.
///
/// # Object Safety
///
/// Uses `async_trait` so discovery can hold an `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Short strategy name for logs ("direct", "relay").
    fn name(&self) -> &str;

    /// Fetches `url` and returns its body as JSON, or raw text when the
    /// strategy tolerates non-JSON bodies.
    async fn request(&self, url: &str) -> Result<Payload, TransportError>;

    /// Fetches `url` as raw text (HTML pages).
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        Ok(self.request(url).await?.into_text())
    }
}
