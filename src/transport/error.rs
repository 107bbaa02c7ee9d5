//! Error types for the transport module.

use thiserror::Error;

/// Errors raised while fetching a page through either transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be built (bad proxy address, TLS backend).
    #[error("HTTP client construction failed: {message}")]
    Client {
        /// Builder failure description.
        message: String,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Non-success HTTP status.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// Body was not valid JSON on a JSON-only path.
    #[error("malformed JSON body from {url}: {source}")]
    Decode {
        /// The URL whose body failed to parse.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// `send_and_wait` was called before the relay session started.
    #[error("browser relay is not running")]
    RelayNotRunning,

    /// The relay session was stopped and cannot be restarted.
    #[error("browser relay was stopped")]
    RelayStopped,

    /// The browser side went away before answering.
    #[error("browser relay closed before answering {url}")]
    RelayClosed {
        /// The URL that was waiting for an answer.
        url: String,
    },
}

impl TransportError {
    /// Creates a client construction error.
    pub fn client(message: impl Into<String>) -> Self {
        Self::Client {
            message: message.into(),
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a JSON decode error.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates a relay-closed error.
    pub fn relay_closed(url: impl Into<String>) -> Self {
        Self::RelayClosed { url: url.into() }
    }
}
