//! End-to-end probing over real HTTP
//!
//! Scheduler → rounds → HTTP probes against mock targets → Prometheus recorder.

use std::sync::Arc;
use std::time::Duration;

use packetloss::actors::scheduler::SchedulerHandle;
use packetloss::recorder::{Outcome, PrometheusRecorder};
use pretty_assertions::assert_eq;

use crate::helpers::*;

#[tokio::test]
async fn test_five_ticks_one_healthy_one_timing_out() {
    let healthy = start_healthy_target().await;
    let hanging = start_target(200, Duration::from_secs(10)).await;

    let healthy_label = endpoint_for(&healthy).label().to_string();
    let hanging_label = endpoint_for(&hanging).label().to_string();

    let recorder = PrometheusRecorder::new().unwrap();
    let round = create_http_round(
        endpoints(&[healthy.uri(), hanging.uri()]),
        Duration::from_secs(2),
        Arc::new(recorder.clone()),
    );

    // Ticks at 0s, 1s, 2s, 3s and 4s
    let handle = SchedulerHandle::spawn(round, Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(4500)).await;
    handle.shutdown().await;

    assert_eq!(recorder.outcome_count(&healthy_label, Outcome::Started), 5);
    assert_eq!(recorder.outcome_count(&healthy_label, Outcome::Succeeded), 5);
    assert_eq!(recorder.outcome_count(&healthy_label, Outcome::Failed), 0);
    assert_eq!(recorder.duration_count(&healthy_label), 5);

    assert_eq!(recorder.outcome_count(&hanging_label, Outcome::Started), 5);
    assert_eq!(recorder.outcome_count(&hanging_label, Outcome::Succeeded), 0);
    assert_eq!(recorder.outcome_count(&hanging_label, Outcome::Failed), 5);
    assert_eq!(recorder.duration_count(&hanging_label), 5);

    // Timed-out probes are recorded at roughly the timeout
    let mean = recorder.duration_sum(&hanging_label) / 5.0;
    assert!(mean >= 1.99 && mean < 2.5, "mean timeout duration was {mean}");
}

#[tokio::test]
async fn test_round_now_adds_rounds_outside_cadence() {
    let healthy = start_healthy_target().await;
    let label = endpoint_for(&healthy).label().to_string();

    let recorder = PrometheusRecorder::new().unwrap();
    let round = create_http_round(
        endpoints(&[healthy.uri()]),
        Duration::from_secs(2),
        Arc::new(recorder.clone()),
    );

    let handle = SchedulerHandle::spawn(round, Duration::from_secs(3600));
    for _ in 0..4 {
        assert_eq!(handle.round_now().await.unwrap(), 1);
    }

    let stats = handle.stats().await.unwrap();
    assert_eq!(stats.rounds_launched, 5);

    handle.shutdown().await;

    assert_eq!(recorder.outcome_count(&label, Outcome::Started), 5);
    assert_eq!(recorder.outcome_count(&label, Outcome::Succeeded), 5);
    assert_eq!(healthy.received_requests().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_probes_use_post_without_reading_status() {
    let broken = start_target(500, Duration::ZERO).await;
    let label = endpoint_for(&broken).label().to_string();

    let recorder = PrometheusRecorder::new().unwrap();
    let round = create_http_round(
        endpoints(&[broken.uri()]),
        Duration::from_secs(2),
        Arc::new(recorder.clone()),
    );

    round.launch();
    round.drain().await;

    let requests = broken.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.to_string(), "POST");

    // Any completed round trip counts as success
    assert_eq!(recorder.outcome_count(&label, Outcome::Succeeded), 1);
}
