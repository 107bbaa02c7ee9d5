//! Direct HTTP transport.
//!
//! Issues plain GET requests with the crate's fixed user agent and the
//! configured proxy. JSON endpoints are assumed well-formed, so a body that
//! does not parse is an error here rather than a text fallback.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::config::SiteConfig;
use crate::user_agent;

use super::http_client::build_http_client;
use super::{Payload, Transport, TransportError};

/// Transport that talks to the site directly over HTTP.
#[derive(Debug, Clone)]
pub struct DirectTransport {
    client: Client,
}

impl DirectTransport {
    /// Creates a transport with the site's timeouts and proxy.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Client`] when client construction fails.
    pub fn new(config: &SiteConfig) -> Result<Self, TransportError> {
        Ok(Self {
            client: build_http_client(config, &user_agent::default_user_agent())?,
        })
    }

    async fn get_body(&self, url: &str, accept: &str) -> Result<String, TransportError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|error| TransportError::network(url, error))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::http_status(url, status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|error| TransportError::network(url, error))?;
        debug!(url = %url, bytes = body.len(), "fetched body");
        Ok(body)
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn name(&self) -> &'static str {
        "direct"
    }

    #[tracing::instrument(skip(self), fields(transport = "direct"))]
    async fn request(&self, url: &str) -> Result<Payload, TransportError> {
        let body = self.get_body(url, "application/json").await?;
        let value =
            serde_json::from_str(&body).map_err(|error| TransportError::decode(url, error))?;
        Ok(Payload::Json(value))
    }

    #[tracing::instrument(skip(self), fields(transport = "direct"))]
    async fn fetch_text(&self, url: &str) -> Result<String, TransportError> {
        self.get_body(
            url,
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> DirectTransport {
        DirectTransport::new(&SiteConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_direct_request_parses_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/abc.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"assets": []})))
            .mount(&server)
            .await;

        let url = format!("{}/projects/abc.json", server.uri());
        let payload = transport().request(&url).await.unwrap();
        assert_eq!(payload, Payload::Json(json!({"assets": []})));
    }

    #[tokio::test]
    async fn test_direct_request_sends_fixed_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header_regex("user-agent", "^artstation-dl/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        transport().request(&server.uri()).await.unwrap();
    }

    #[tokio::test]
    async fn test_direct_request_rejects_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>challenge</html>"))
            .mount(&server)
            .await;

        let err = transport().request(&server.uri()).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode { .. }), "{err}");
    }

    #[tokio::test]
    async fn test_direct_request_maps_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = transport().request(&server.uri()).await.unwrap_err();
        assert!(
            matches!(err, TransportError::HttpStatus { status: 403, .. }),
            "{err}"
        );
    }

    #[tokio::test]
    async fn test_direct_fetch_text_returns_html_unparsed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/someone"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>user_id: 42</p>"))
            .mount(&server)
            .await;

        let url = format!("{}/someone", server.uri());
        let text = transport().fetch_text(&url).await.unwrap();
        assert_eq!(text, "<p>user_id: 42</p>");
    }
}
