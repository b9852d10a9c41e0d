//! Transport trait for the report request.
//!
//! The fetcher issues exactly one GET per invocation through this trait, so
//! tests can swap in [`MockTransport`](crate::testing::MockTransport) and run
//! without network access.

use async_trait::async_trait;

use crate::error::TransportResult;

/// What the fetcher reads back from a GET: the status (for logging only) and
/// the full text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Shorthand for a `200` response.
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch `url` and return its status and body.
    ///
    /// A non-2xx status is not an error here; only failures to send the
    /// request or read the body are.
    async fn get(&self, url: &str) -> TransportResult<TransportResponse>;

    /// Get the transport name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn get(&self, url: &str) -> TransportResult<TransportResponse> {
        (**self).get(url).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
