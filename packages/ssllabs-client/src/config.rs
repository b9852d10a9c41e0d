use std::time::Duration;

/// Analyze page of the public SSL Labs service.
pub const DEFAULT_BASE_URL: &str = "https://www.ssllabs.com/ssltest/analyze.html";
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 5000;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 4000;

/// Poll loop settings for a [`ReportFetcher`](crate::ReportFetcher).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Page the domain query is appended to
    pub base_url: String,

    /// Upper bound on readiness checks (at least one check always runs)
    pub max_attempts: u32,

    /// Pause after the request, before the first check
    pub initial_delay_ms: u64,

    /// Pause after each failed check that still has attempts left
    pub retry_delay_ms: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
        }
    }
}

impl FetchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_initial_delay_ms(mut self, ms: u64) -> Self {
        self.initial_delay_ms = ms;
        self
    }

    pub fn with_retry_delay_ms(mut self, ms: u64) -> Self {
        self.retry_delay_ms = ms;
        self
    }

    /// Number of checks the poll loop will actually run.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = FetchOptions::default();
        assert_eq!(options.base_url, DEFAULT_BASE_URL);
        assert_eq!(options.max_attempts, 30);
        assert_eq!(options.initial_delay(), Duration::from_secs(5));
        assert_eq!(options.retry_delay(), Duration::from_secs(4));
    }

    #[test]
    fn test_builder() {
        let options = FetchOptions::new()
            .with_base_url("http://localhost:8080/analyze.html")
            .with_max_attempts(3)
            .with_initial_delay_ms(0)
            .with_retry_delay_ms(10);

        assert_eq!(options.base_url, "http://localhost:8080/analyze.html");
        assert_eq!(options.max_attempts, 3);
        assert_eq!(options.initial_delay(), Duration::ZERO);
        assert_eq!(options.retry_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_effective_attempts_never_zero() {
        assert_eq!(FetchOptions::new().with_max_attempts(0).effective_attempts(), 1);
        assert_eq!(FetchOptions::new().with_max_attempts(1).effective_attempts(), 1);
        assert_eq!(FetchOptions::new().with_max_attempts(7).effective_attempts(), 7);
    }
}
