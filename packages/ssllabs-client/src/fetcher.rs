//! Report fetcher and its poll loop.
//!
//! The analyze page is requested once. The service keeps computing and
//! re-renders the page in the browser, which a plain GET cannot observe, so
//! the loop below re-checks the same snapshot on a fixed schedule instead of
//! re-fetching. It is effectively a bounded wait for server-side readiness.

use tracing::{debug, info, warn};

use crate::config::FetchOptions;
use crate::extractor::extract_tables;
use crate::traits::sleeper::{Sleeper, TokioSleeper};
use crate::traits::transport::Transport;
use crate::transports::HttpTransport;
use crate::types::{total_rows, FetchResult, ReportFailure};

/// Substring that shows up once the rating section has rendered.
pub const READY_MARKER: &str = "rating_";

/// Build the analyze URL for `domain`.
///
/// The domain is percent-encoded with everything but `A-Z a-z 0-9 - _ . ~`
/// escaped, so `! ' ( ) *` are escaped too, unlike a browser's
/// `encodeURIComponent`. Valid hostnames never contain them.
pub fn build_report_url(base_url: &str, domain: &str) -> String {
    format!(
        "{}?viaform=true&hideResults=on&latest&d={}",
        base_url,
        urlencoding::encode(domain)
    )
}

/// Fetches an SSL Labs report for a domain and scrapes its result tables.
///
/// Transport and delay are injected so the whole flow can run without
/// network access or real waits.
///
/// # Example
///
/// ```rust,ignore
/// use ssllabs_client::{FetchOptions, FetchResult, HttpTransport, ReportFetcher};
///
/// let fetcher = ReportFetcher::new(HttpTransport::new()?)
///     .with_options(FetchOptions::new().with_max_attempts(10));
///
/// match fetcher.fetch("example.com").await {
///     FetchResult::Success { report, .. } => println!("{} tables", report.len()),
///     FetchResult::Failure { error, .. } => eprintln!("{error}"),
/// }
/// ```
pub struct ReportFetcher<T, S = TokioSleeper> {
    transport: T,
    sleeper: S,
    options: FetchOptions,
}

impl<T: Transport> ReportFetcher<T> {
    /// Create a fetcher with default options and real wall-clock delays.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            sleeper: TokioSleeper,
            options: FetchOptions::default(),
        }
    }
}

impl<T: Transport, S: Sleeper> ReportFetcher<T, S> {
    /// Swap the delay implementation.
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> ReportFetcher<T, S2> {
        ReportFetcher {
            transport: self.transport,
            sleeper,
            options: self.options,
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetch the report for `domain`.
    ///
    /// Never fails: transport errors and an unready report both come back as
    /// [`FetchResult::Failure`] carrying `domain` unchanged.
    pub async fn fetch(&self, domain: &str) -> FetchResult {
        let url = build_report_url(&self.options.base_url, domain);
        info!(
            domain,
            url = %url,
            transport = self.transport.name(),
            "Requesting SSL Labs report"
        );

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(domain, error = %e, "Failed to fetch SSL Labs report");
                return FetchResult::failure(domain, ReportFailure::FetchFailed);
            }
        };

        info!(
            domain,
            status = response.status,
            body_len = response.body.len(),
            "Initial response received"
        );

        self.sleeper.sleep(self.options.initial_delay()).await;
        debug!(
            domain,
            initial_delay_ms = self.options.initial_delay_ms,
            "Initial delay completed"
        );

        let Some(attempts) = self.wait_for_marker(domain, &response.body).await else {
            warn!(
                domain,
                attempts = self.options.effective_attempts(),
                "SSL Labs report not ready, giving up"
            );
            return FetchResult::failure(domain, ReportFailure::NotReady);
        };

        let report = extract_tables(&response.body);
        info!(
            domain,
            attempts,
            tables = report.len(),
            rows = total_rows(&report),
            "SSL Labs analysis complete"
        );

        FetchResult::success(domain, report)
    }

    /// Check `markup` for the readiness marker, waiting between checks.
    ///
    /// Returns the attempt on which the marker was seen, or `None` once every
    /// attempt is used up. No delay follows the final check.
    async fn wait_for_marker(&self, domain: &str, markup: &str) -> Option<u32> {
        let max_attempts = self.options.effective_attempts();

        for attempt in 1..=max_attempts {
            debug!(domain, attempt, max_attempts, "Checking for readiness marker");

            if markup.contains(READY_MARKER) {
                debug!(domain, attempt, "Readiness marker found");
                return Some(attempt);
            }

            if attempt < max_attempts {
                debug!(
                    domain,
                    attempt,
                    max_attempts,
                    retry_delay_ms = self.options.retry_delay_ms,
                    "Report still loading"
                );
                self.sleeper.sleep(self.options.retry_delay()).await;
            }
        }

        None
    }
}

/// Fetch a report over HTTP with real delays.
///
/// Shorthand for `ReportFetcher::new(HttpTransport::new()?).with_options(options)`;
/// a client construction failure is reported like any other fetch failure.
pub async fn fetch_report(domain: &str, options: FetchOptions) -> FetchResult {
    match HttpTransport::new() {
        Ok(transport) => {
            ReportFetcher::new(transport)
                .with_options(options)
                .fetch(domain)
                .await
        }
        Err(e) => {
            warn!(domain, error = %e, "Failed to create HTTP transport");
            FetchResult::failure(domain, ReportFailure::FetchFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BASE_URL;

    #[test]
    fn test_build_report_url() {
        assert_eq!(
            build_report_url(DEFAULT_BASE_URL, "example.com"),
            "https://www.ssllabs.com/ssltest/analyze.html?viaform=true&hideResults=on&latest&d=example.com"
        );
    }

    #[test]
    fn test_build_report_url_encodes_domain() {
        assert_eq!(
            build_report_url("http://localhost/analyze.html", "exa mple.com/a?b=c&d"),
            "http://localhost/analyze.html?viaform=true&hideResults=on&latest&d=exa%20mple.com%2Fa%3Fb%3Dc%26d"
        );
    }

    #[test]
    fn test_build_report_url_escapes_sub_delims() {
        assert_eq!(
            build_report_url("http://localhost/analyze.html", "a!b'c(d)e*f~g"),
            "http://localhost/analyze.html?viaform=true&hideResults=on&latest&d=a%21b%27c%28d%29e%2Af~g"
        );
    }
}
