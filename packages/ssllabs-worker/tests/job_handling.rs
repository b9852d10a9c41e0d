//! Job handling against mock transports.

use std::time::Duration;

use futures::future::join_all;
use serde_json::json;
use ssllabs_client::{
    testing::{MockTransport, RecordingSleeper},
    FetchOptions, FetchResult, ReportFailure, ReportFetcher, ReportRow,
};
use ssllabs_worker::{handle_job, JobInput, JobOutcome};

const READY_PAGE: &str = r#"<div class="rating_a"></div>
<table class="reportTable"><tr>
  <td class="tableLabel">Protocol</td><td class="tableCell">TLS 1.3</td>
</tr></table>"#;

fn fast_fetcher(transport: &MockTransport) -> ReportFetcher<MockTransport, RecordingSleeper> {
    ReportFetcher::new(transport.clone())
        .with_sleeper(RecordingSleeper::new())
        .with_options(
            FetchOptions::new()
                .with_max_attempts(3)
                .with_initial_delay_ms(1)
                .with_retry_delay_ms(1),
        )
}

#[tokio::test]
async fn test_missing_url_is_rejected_without_fetching() {
    let transport = MockTransport::with_body(READY_PAGE);
    let fetcher = fast_fetcher(&transport);

    for variables in [json!({}), json!({ "url": "" }), json!({ "url": 7 })] {
        let outcome = handle_job(&fetcher, &JobInput::from_variables(&variables), None).await;

        assert_eq!(outcome, JobOutcome::rejected());
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({ "error": "No URL provided." })
        );
    }

    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_completed_job_carries_fetch_result() {
    let transport = MockTransport::with_body(READY_PAGE);
    let fetcher = fast_fetcher(&transport);

    let outcome = handle_job(
        &fetcher,
        &JobInput::from_variables(&json!({ "url": "example.com" })),
        Some(Duration::from_secs(60)),
    )
    .await;

    assert!(outcome.is_success());
    assert_eq!(
        outcome,
        JobOutcome::Completed(FetchResult::success(
            "example.com",
            vec![vec![ReportRow::new("Protocol", "TLS 1.3")]]
        ))
    );
    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "url": "example.com",
            "report": [[{ "label": "Protocol", "value": "TLS 1.3" }]]
        })
    );
}

#[tokio::test]
async fn test_fetch_failure_is_completed_not_rejected() {
    let transport = MockTransport::failing("dns lookup failed");
    let fetcher = fast_fetcher(&transport);

    let outcome = handle_job(&fetcher, &JobInput::new("example.com"), None).await;

    assert!(!outcome.is_success());
    assert_eq!(
        outcome,
        JobOutcome::Completed(FetchResult::failure(
            "example.com",
            ReportFailure::FetchFailed
        ))
    );
}

#[tokio::test(start_paused = true)]
async fn test_job_timeout_abandons_slow_fetch() {
    let transport = MockTransport::with_body("<p>still loading</p>");
    let fetcher = ReportFetcher::new(transport.clone()).with_options(
        FetchOptions::new()
            .with_max_attempts(30)
            .with_initial_delay_ms(5000)
            .with_retry_delay_ms(4000),
    );

    let outcome = handle_job(
        &fetcher,
        &JobInput::new("example.com"),
        Some(Duration::from_secs(20)),
    )
    .await;

    assert_eq!(
        outcome,
        JobOutcome::timed_out("example.com", Duration::from_secs(20))
    );
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_batch_jobs_are_independent() {
    let transport = MockTransport::with_body(READY_PAGE);
    let fetcher = fast_fetcher(&transport);
    let jobs = vec![
        JobInput::new("a.example.com"),
        JobInput::default(),
        JobInput::new("b.example.com"),
    ];

    let outcomes = join_all(jobs.iter().map(|job| handle_job(&fetcher, job, None))).await;

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1], JobOutcome::rejected());
    assert!(outcomes[2].is_success());
    assert_eq!(
        transport.calls().len(),
        2,
        "rejected jobs must not reach the transport"
    );
}
