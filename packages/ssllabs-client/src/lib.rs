//! SSL Labs report client.
//!
//! Requests the SSL Labs analyze page for a domain, waits for the report to
//! be ready, and scrapes its `reportTable` blocks into label/value rows.
//!
//! # Example
//!
//! ```rust,ignore
//! use ssllabs_client::{fetch_report, FetchOptions, FetchResult};
//!
//! match fetch_report("example.com", FetchOptions::default()).await {
//!     FetchResult::Success { report, .. } => {
//!         for row in report.iter().flatten() {
//!             println!("{}: {}", row.label, row.value);
//!         }
//!     }
//!     FetchResult::Failure { error, .. } => eprintln!("{error}"),
//! }
//! ```
//!
//! # Modules
//!
//! - [`fetcher`] - request + poll loop
//! - [`extractor`] - markup table scraping
//! - [`traits`] - `Transport` and `Sleeper` seams
//! - [`transports`] - `HttpTransport`
//! - [`testing`] - mock transport and recording sleeper

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod testing;
pub mod traits;
pub mod transports;
pub mod types;

pub use config::FetchOptions;
pub use error::{TransportError, TransportResult};
pub use extractor::{clean_cell_text, extract_tables};
pub use fetcher::{build_report_url, fetch_report, ReportFetcher, READY_MARKER};
pub use traits::{
    sleeper::{Sleeper, TokioSleeper},
    transport::{Transport, TransportResponse},
};
pub use transports::HttpTransport;
pub use types::{total_rows, FetchResult, ReportFailure, ReportRow, ReportTable};
