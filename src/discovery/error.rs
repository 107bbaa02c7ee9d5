//! Error types for portfolio discovery.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that end a discovery run.
///
/// Every variant is fatal to the task stream: there is no retry at this layer,
/// and a new run starts again from page 1.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The underlying fetch failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A page response came back without `total_count`.
    #[error("page response from {url} has no total_count; the listing API contract changed")]
    MissingTotalCount {
        /// The page URL.
        url: String,
    },

    /// A JSON endpoint answered with non-JSON text (relay interstitial, login page).
    #[error("expected JSON from {url} but received text")]
    UnexpectedText {
        /// The endpoint URL.
        url: String,
    },

    /// JSON did not have the expected shape.
    #[error("unexpected response shape from {url}: {source}")]
    Decode {
        /// The endpoint URL.
        url: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// No `user_id` marker was found on the profile page.
    #[error("cannot resolve profile identity from {url}: no user_id found")]
    IdentityNotFound {
        /// The profile URL.
        url: String,
    },

    /// The profile URL does not belong to the configured site.
    #[error("invalid profile URL {url}: {reason}")]
    InvalidProfileUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl DiscoveryError {
    pub fn missing_total_count(url: impl Into<String>) -> Self {
        Self::MissingTotalCount { url: url.into() }
    }

    pub fn unexpected_text(url: impl Into<String>) -> Self {
        Self::UnexpectedText { url: url.into() }
    }

    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    pub fn identity_not_found(url: impl Into<String>) -> Self {
        Self::IdentityNotFound { url: url.into() }
    }

    pub fn invalid_profile_url(url: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidProfileUrl {
            url: url.into(),
            reason,
        }
    }
}
