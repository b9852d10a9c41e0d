//! Transport implementations.
//!
//! - `HttpTransport` - real HTTP via `reqwest`
//! - `MockTransport` - canned responses, see [`crate::testing`]

mod http;

pub use http::HttpTransport;

// Re-export from traits for convenience
pub use crate::traits::transport::{Transport, TransportResponse};
