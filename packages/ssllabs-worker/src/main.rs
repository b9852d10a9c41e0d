//! SSL Labs fetch worker CLI
//!
//! Usage:
//!   ssllabs-worker example.com other.org
//!   ssllabs-worker --variables '{"url":"example.com"}' --pretty

use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use serde_json::Value;
use ssllabs_client::{HttpTransport, ReportFetcher};
use ssllabs_worker::{handle_job, JobInput, WorkerConfig};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ssllabs-worker")]
#[command(about = "Fetch SSL Labs reports and print them as JSON")]
struct Cli {
    /// Domains to fetch, one job each
    domains: Vec<String>,

    /// Raw job variables as a JSON object, e.g. '{"url":"example.com"}'
    #[arg(long = "variables", value_name = "JSON")]
    variables: Vec<String>,

    /// Override SSLLABS_MAX_ATTEMPTS
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Override SSLLABS_INITIAL_DELAY_MS
    #[arg(long)]
    initial_delay_ms: Option<u64>,

    /// Override SSLLABS_RETRY_DELAY_MS
    #[arg(long)]
    retry_delay_ms: Option<u64>,

    /// Override SSLLABS_JOB_TIMEOUT_SECS
    #[arg(long)]
    job_timeout_secs: Option<u64>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    fn apply(&self, config: &mut WorkerConfig) {
        if let Some(n) = self.max_attempts {
            config.max_attempts = n;
        }
        if let Some(ms) = self.initial_delay_ms {
            config.initial_delay_ms = ms;
        }
        if let Some(ms) = self.retry_delay_ms {
            config.retry_delay_ms = ms;
        }
        if let Some(secs) = self.job_timeout_secs {
            config.job_timeout_secs = Some(secs);
        }
    }

    fn jobs(&self) -> Result<Vec<JobInput>> {
        let mut jobs: Vec<JobInput> = self.domains.iter().map(JobInput::new).collect();

        for raw in &self.variables {
            let variables: Value = serde_json::from_str(raw)
                .with_context(|| format!("Invalid --variables JSON: {raw}"))?;
            jobs.push(JobInput::from_variables(&variables));
        }

        Ok(jobs)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,ssllabs_client=debug,ssllabs_worker=debug".into()
            }),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    let mut config = WorkerConfig::from_env().context("Failed to load configuration")?;
    cli.apply(&mut config);

    let jobs = cli.jobs()?;
    if jobs.is_empty() {
        anyhow::bail!("No jobs given: pass one or more domains or --variables");
    }

    info!(
        jobs = jobs.len(),
        base_url = %config.base_url,
        max_attempts = config.max_attempts,
        "Starting SSL Labs worker"
    );

    let transport = HttpTransport::with_timeout(config.request_timeout())
        .context("Failed to create HTTP transport")?;
    let fetcher = ReportFetcher::new(transport).with_options(config.fetch_options());
    let timeout: Option<Duration> = config.job_timeout();

    let outcomes = join_all(jobs.iter().map(|job| handle_job(&fetcher, job, timeout))).await;

    for outcome in &outcomes {
        let json = if cli.pretty {
            serde_json::to_string_pretty(outcome)?
        } else {
            serde_json::to_string(outcome)?
        };
        println!("{json}");
    }

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    info!(
        total = outcomes.len(),
        succeeded,
        failed = outcomes.len() - succeeded,
        "SSL Labs worker finished"
    );

    Ok(())
}
