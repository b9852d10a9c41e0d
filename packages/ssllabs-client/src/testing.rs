//! Testing utilities including mock implementations.
//!
//! These let callers exercise [`ReportFetcher`](crate::ReportFetcher) without
//! network access or real waits.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{TransportError, TransportResult};
use crate::traits::sleeper::Sleeper;
use crate::traits::transport::{Transport, TransportResponse};

#[derive(Debug, Clone)]
enum MockReply {
    Respond(TransportResponse),
    Fail(String),
}

/// Mock transport returning one canned reply for every request.
///
/// # Example
///
/// ```rust
/// use ssllabs_client::testing::MockTransport;
///
/// let transport = MockTransport::with_body("<img src=\"rating_a.png\">");
/// assert_eq!(transport.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockTransport {
    reply: Arc<RwLock<MockReply>>,
    /// Requested URLs, for verification
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockTransport {
    /// Answer every request with a `200` and `body`.
    pub fn with_body(body: impl Into<String>) -> Self {
        Self::with_response(TransportResponse::ok(body))
    }

    /// Answer every request with `response`.
    pub fn with_response(response: TransportResponse) -> Self {
        Self::from_reply(MockReply::Respond(response))
    }

    /// Fail every request with an HTTP error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_reply(MockReply::Fail(message.into()))
    }

    fn from_reply(reply: MockReply) -> Self {
        Self {
            reply: Arc::new(RwLock::new(reply)),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the body returned from now on.
    pub fn set_body(&self, body: impl Into<String>) {
        *self.reply.write().unwrap() = MockReply::Respond(TransportResponse::ok(body));
    }

    /// Get the number of requests made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get the URLs that were requested.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> TransportResult<TransportResponse> {
        self.calls.write().unwrap().push(url.to_string());

        let reply = self.reply.read().unwrap().clone();
        match reply {
            MockReply::Respond(response) => Ok(response),
            MockReply::Fail(message) => Err(TransportError::Http(message.into())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Sleeper that records requested delays and returns immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    calls: Arc<RwLock<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of sleeps requested.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Get every requested delay, in order.
    pub fn calls(&self) -> Vec<Duration> {
        self.calls.read().unwrap().clone()
    }

    /// Sum of every requested delay.
    pub fn total(&self) -> Duration {
        self.calls.read().unwrap().iter().sum()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.calls.write().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}
