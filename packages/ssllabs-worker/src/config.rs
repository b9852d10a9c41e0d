use anyhow::{Context, Result};
use dotenvy::dotenv;
use ssllabs_client::config::{
    DEFAULT_BASE_URL, DEFAULT_INITIAL_DELAY_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY_MS,
};
use ssllabs_client::FetchOptions;
use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Worker configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub base_url: String,
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub retry_delay_ms: u64,
    /// HTTP client timeout for the single report request
    pub request_timeout_secs: u64,
    /// Upper bound on a whole job; `None` lets the poll loop run to exhaustion
    pub job_timeout_secs: Option<u64>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            job_timeout_secs: None,
        }
    }
}

impl WorkerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            base_url: lookup("SSLLABS_BASE_URL").unwrap_or(defaults.base_url),
            max_attempts: parse_or(&lookup, "SSLLABS_MAX_ATTEMPTS", defaults.max_attempts)?,
            initial_delay_ms: parse_or(
                &lookup,
                "SSLLABS_INITIAL_DELAY_MS",
                defaults.initial_delay_ms,
            )?,
            retry_delay_ms: parse_or(&lookup, "SSLLABS_RETRY_DELAY_MS", defaults.retry_delay_ms)?,
            request_timeout_secs: parse_or(
                &lookup,
                "SSLLABS_REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            job_timeout_secs: lookup("SSLLABS_JOB_TIMEOUT_SECS")
                .map(|raw| {
                    raw.parse()
                        .context("SSLLABS_JOB_TIMEOUT_SECS must be a valid number")
                })
                .transpose()?,
        })
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new()
            .with_base_url(self.base_url.clone())
            .with_max_attempts(self.max_attempts)
            .with_initial_delay_ms(self.initial_delay_ms)
            .with_retry_delay_ms(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn job_timeout(&self) -> Option<Duration> {
        self.job_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a valid number")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = WorkerConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config, WorkerConfig::default());
        assert_eq!(config.fetch_options(), FetchOptions::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.job_timeout(), None);
    }

    #[test]
    fn test_reads_overrides() {
        let config = WorkerConfig::from_lookup(lookup_from(&[
            ("SSLLABS_BASE_URL", "http://localhost:9000/analyze.html"),
            ("SSLLABS_MAX_ATTEMPTS", "3"),
            ("SSLLABS_INITIAL_DELAY_MS", "0"),
            ("SSLLABS_RETRY_DELAY_MS", " 250 "),
            ("SSLLABS_REQUEST_TIMEOUT_SECS", "10"),
            ("SSLLABS_JOB_TIMEOUT_SECS", "120"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:9000/analyze.html");
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay_ms, 0);
        assert_eq!(config.retry_delay_ms, 250);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.job_timeout(), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_rejects_invalid_numbers() {
        let err = WorkerConfig::from_lookup(lookup_from(&[("SSLLABS_MAX_ATTEMPTS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("SSLLABS_MAX_ATTEMPTS"));

        let err = WorkerConfig::from_lookup(lookup_from(&[("SSLLABS_JOB_TIMEOUT_SECS", "-1")]))
            .unwrap_err();
        assert!(err.to_string().contains("SSLLABS_JOB_TIMEOUT_SECS"));
    }
}
