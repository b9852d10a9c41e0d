//! Job handling for SSL Labs fetch requests.
//!
//! A job carries a free-form variables object; only its `url` string is read.
//! The outcome is always a JSON-serialisable value, never an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ssllabs_client::{FetchResult, ReportFetcher, Sleeper, Transport};
use tracing::{info, warn};

pub const NO_URL_ERROR: &str = "No URL provided.";

/// Input variables of a fetch job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl JobInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Read the job input from a variables object.
    ///
    /// A `url` that is missing or not a string is treated as absent.
    pub fn from_variables(variables: &Value) -> Self {
        Self {
            url: variables
                .get("url")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    /// Domain to fetch, if the job names one.
    pub fn domain(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Result a job completes with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JobOutcome {
    Completed(FetchResult),
    Rejected { error: String },
    TimedOut { url: String, error: String },
}

impl JobOutcome {
    pub fn rejected() -> Self {
        JobOutcome::Rejected {
            error: NO_URL_ERROR.to_string(),
        }
    }

    pub fn timed_out(url: impl Into<String>, timeout: Duration) -> Self {
        JobOutcome::TimedOut {
            url: url.into(),
            error: format!(
                "SSL Labs report fetch timed out after {} seconds.",
                timeout.as_secs()
            ),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobOutcome::Completed(result) if result.is_success())
    }
}

/// Run one fetch job.
///
/// Rejects input without a usable `url`. With a `timeout`, a fetch that has
/// not finished in time is abandoned and reported as [`JobOutcome::TimedOut`].
pub async fn handle_job<T, S>(
    fetcher: &ReportFetcher<T, S>,
    input: &JobInput,
    timeout: Option<Duration>,
) -> JobOutcome
where
    T: Transport,
    S: Sleeper,
{
    let Some(domain) = input.domain() else {
        warn!("Job rejected: no url provided");
        return JobOutcome::rejected();
    };

    info!(domain, timeout_secs = timeout.map(|t| t.as_secs()), "Job started");

    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, fetcher.fetch(domain)).await {
            Ok(result) => JobOutcome::Completed(result),
            Err(_) => {
                warn!(domain, timeout_secs = limit.as_secs(), "Job timed out");
                JobOutcome::timed_out(domain, limit)
            }
        },
        None => JobOutcome::Completed(fetcher.fetch(domain).await),
    };

    info!(domain, success = outcome.is_success(), "Job finished");
    outcome
}
