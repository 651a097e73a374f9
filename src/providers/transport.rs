//! Fetch-by-URL seam between the repository and the network.

use super::util::with_retry;
use crate::core::config::ProviderConfig;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("nbg-rates/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error: {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Received empty response from {0}")]
    EmptyResponse(String),
}

/// Raw HTTP answer. Non-success statuses are returned as-is so the caller can
/// inspect provider error payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    retries: usize,
    retry_delay_ms: u64,
}

impl HttpTransport {
    pub fn new(config: &ProviderConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            retries: config.retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(name = "NbgFetch", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchResponse, TransportError> {
        let response = with_retry(
            || async { self.client.get(url).send().await },
            self.retries,
            self.retry_delay_ms,
        )
        .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "Received response");

        if body.trim().is_empty() {
            return Err(TransportError::EmptyResponse(url.to_string()));
        }
        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport() -> HttpTransport {
        let config = ProviderConfig {
            retries: 0,
            ..ProviderConfig::default()
        };
        HttpTransport::new(&config).unwrap()
    }

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ka/json"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = create_mock_server(200, r#"[{"date": "2024-05-14"}]"#).await;
        let url = format!("{}/ka/json", mock_server.uri());

        let response = transport().fetch(&url).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.body, r#"[{"date": "2024-05-14"}]"#);
    }

    #[tokio::test]
    async fn test_fetch_keeps_error_status_and_body() {
        let mock_server = create_mock_server(422, r#"{"errors": []}"#).await;
        let url = format!("{}/ka/json", mock_server.uri());

        let response = transport().fetch(&url).await.unwrap();
        assert_eq!(response.status, 422);
        assert!(!response.is_success());
        assert_eq!(response.body, r#"{"errors": []}"#);
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mock_server = create_mock_server(200, "  ").await;
        let url = format!("{}/ka/json", mock_server.uri());

        let result = transport().fetch(&url).await;
        assert!(matches!(result, Err(TransportError::EmptyResponse(u)) if u == url));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Nothing listens on port 9 on the loopback interface
        let result = transport().fetch("http://127.0.0.1:9/ka/json").await;
        assert!(matches!(result, Err(TransportError::Http(_))));
    }
}
