//! Typed errors for the transport layer.
//!
//! These never reach the caller of [`ReportFetcher::fetch`](crate::ReportFetcher::fetch);
//! the fetcher logs them and folds them into
//! [`ReportFailure::FetchFailed`](crate::ReportFailure::FetchFailed).

use thiserror::Error;

/// Errors that can occur while talking to the report service.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP request failed before a response arrived
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response arrived but the body could not be read as text
    #[error("failed to read response body: {0}")]
    Body(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for transport operations.
pub type TransportResult<T> = std::result::Result<T, TransportError>;
