//! Seams for the fetcher's I/O.
//!
//! - [`transport::Transport`] - the single outbound GET
//! - [`sleeper::Sleeper`] - the waits between poll checks

pub mod sleeper;
pub mod transport;
