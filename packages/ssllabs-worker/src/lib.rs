//! SSL Labs fetch worker.
//!
//! Wraps [`ssllabs_client::ReportFetcher`] with job input handling, an
//! optional per-job deadline and environment-driven configuration.

pub mod config;
pub mod job;

pub use config::WorkerConfig;
pub use job::{handle_job, JobInput, JobOutcome, NO_URL_ERROR};
