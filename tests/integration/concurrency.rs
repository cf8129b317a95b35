//! Concurrency tests
//!
//! These tests verify that concurrent probes never lose updates:
//! - Many probes against one endpoint in one round
//! - Many probes from independent tasks sharing one recorder
//! - Overlapping rounds against a slow endpoint

use std::sync::Arc;
use std::time::Duration;

use packetloss::probe::Probe;
use packetloss::recorder::{Outcome, PrometheusRecorder};
use packetloss::transport::HttpTransport;
use packetloss::{config::HttpMethod, round::ProbeRound};

use crate::helpers::*;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_endpoint_many_times_in_one_round() {
    const N: usize = 50;

    let mock_server = start_healthy_target().await;
    let label = endpoint_for(&mock_server).label().to_string();

    let recorder = PrometheusRecorder::new().unwrap();
    let round = create_http_round(
        endpoints(&vec![mock_server.uri(); N]),
        Duration::from_secs(5),
        Arc::new(recorder.clone()),
    );

    assert_eq!(round.launch(), N);
    round.drain().await;

    assert_eq!(recorder.outcome_count(&label, Outcome::Started), N as u64);
    assert_eq!(recorder.outcome_count(&label, Outcome::Succeeded), N as u64);
    assert_eq!(recorder.duration_count(&label), N as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_probe_tasks_share_recorder() {
    const N: usize = 200;

    let mock_server = start_healthy_target().await;
    let endpoint = endpoint_for(&mock_server);

    let recorder = PrometheusRecorder::new().unwrap();
    let transport = HttpTransport::new(Duration::from_secs(5), HttpMethod::Post).unwrap();
    let probe = Probe::new(Arc::new(transport), Arc::new(recorder.clone()), Duration::from_secs(5));

    let tasks: Vec<_> = (0..N)
        .map(|_| {
            let probe = probe.clone();
            let endpoint = endpoint.clone();
            tokio::spawn(async move { probe.run(&endpoint).await })
        })
        .collect();

    for task in futures::future::join_all(tasks).await {
        assert_eq!(task.unwrap().outcome, Outcome::Succeeded);
    }

    assert_eq!(recorder.outcome_count(endpoint.label(), Outcome::Succeeded), N as u64);
    assert_eq!(recorder.duration_count(endpoint.label()), N as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_overlapping_rounds() {
    let slow = start_target(200, Duration::from_millis(300)).await;
    let label = endpoint_for(&slow).label().to_string();

    let recorder = PrometheusRecorder::new().unwrap();
    let round = create_http_round(
        endpoints(&[slow.uri()]),
        Duration::from_secs(2),
        Arc::new(recorder.clone()),
    );

    // Three rounds launched back to back, each outlives the next launch
    for _ in 0..3 {
        round.launch();
    }
    assert_eq!(round.in_flight(), 3);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(recorder.outcome_count(&label, Outcome::Started), 3);
    assert_eq!(recorder.outcome_count(&label, Outcome::Succeeded), 0);

    round.drain().await;
    assert_eq!(recorder.outcome_count(&label, Outcome::Succeeded), 3);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_cap_drops_instead_of_queueing() {
    let transport = Arc::new(
        ScriptedTransport::new().with("slow.example", Behavior::Answer(Duration::from_secs(1))),
    );
    let recorder = Arc::new(packetloss::recorder::MemoryRecorder::new());
    let probe = Probe::new(transport.clone(), recorder.clone(), Duration::from_secs(2));
    let round = ProbeRound::new(probe, endpoints(&["https://slow.example".to_string()]))
        .with_max_in_flight(Some(2));

    assert_eq!(round.launch(), 1);
    assert_eq!(round.launch(), 1);
    assert_eq!(round.launch(), 0);
    assert_eq!(round.dropped(), 1);

    round.drain().await;
    assert_eq!(transport.calls("slow.example").len(), 2);
    assert_eq!(recorder.outcome_count("slow.example", Outcome::Started), 2);

    // Permits come back once probes resolve
    assert_eq!(round.launch(), 1);
    round.drain().await;
}
