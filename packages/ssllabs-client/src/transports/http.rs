//! `reqwest`-backed transport.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{TransportError, TransportResult};
use crate::traits::transport::{Transport, TransportResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = "ssllabs-client/0.1";

/// Plain HTTP transport for the SSL Labs analyze page.
///
/// # Example
///
/// ```rust,ignore
/// use ssllabs_client::{HttpTransport, ReportFetcher};
///
/// let fetcher = ReportFetcher::new(HttpTransport::new()?);
/// let result = fetcher.fetch("example.com").await;
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a 30 second request timeout.
    pub fn new() -> TransportResult<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| TransportError::Client(Box::new(e)))?;

        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> TransportResult<TransportResponse> {
        debug!(url = %url, "HTTP GET starting");
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "HTTP request failed");
            TransportError::Http(Box::new(e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(Box::new(e)))?;

        Ok(TransportResponse { status, body })
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_transport() {
        let transport = HttpTransport::new().unwrap();
        assert_eq!(transport.name(), "http");
    }

    #[test]
    fn test_create_with_timeout() {
        let transport = HttpTransport::with_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(transport.name(), "http");
    }
}
