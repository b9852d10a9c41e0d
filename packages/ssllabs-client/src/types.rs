use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A single label/value pair scraped from a report table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Rows of one `reportTable` block, in document order.
pub type ReportTable = Vec<ReportRow>;

/// Why a fetch did not produce a report.
///
/// The `Display` text is the message handed back to callers, so it must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReportFailure {
    /// The readiness marker never showed up within the configured attempts.
    #[error("SSL Labs report not ready after multiple attempts.")]
    NotReady,

    /// The request or the body read failed.
    #[error("Failed to fetch SSL Labs report.")]
    FetchFailed,
}

impl Serialize for ReportFailure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of one report fetch.
///
/// Serialises untagged, so callers see either `{"url", "report"}` or
/// `{"url", "error"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FetchResult {
    Success {
        url: String,
        report: Vec<ReportTable>,
    },
    Failure {
        url: String,
        error: ReportFailure,
    },
}

impl FetchResult {
    pub fn success(url: impl Into<String>, report: Vec<ReportTable>) -> Self {
        Self::Success {
            url: url.into(),
            report,
        }
    }

    pub fn failure(url: impl Into<String>, error: ReportFailure) -> Self {
        Self::Failure {
            url: url.into(),
            error,
        }
    }

    /// The domain this result belongs to, exactly as the caller passed it.
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn report(&self) -> Option<&[ReportTable]> {
        match self {
            Self::Success { report, .. } => Some(report),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<ReportFailure> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(*error),
        }
    }
}

/// Total number of rows across every table of a report.
pub fn total_rows(report: &[ReportTable]) -> usize {
    report.iter().map(Vec::len).sum()
}
