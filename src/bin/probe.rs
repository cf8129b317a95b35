use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use packetloss::{
    actors::scheduler::SchedulerHandle,
    api::{ApiState, spawn_metrics_server},
    config::{Config, read_config_file},
    probe::Probe,
    recorder::PrometheusRecorder,
    round::ProbeRound,
    transport::HttpTransport,
    util::{get_log_level, metrics_bind},
};
use tracing::{error, info, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file (built-in endpoint list if omitted)
    #[arg(short)]
    file: Option<String>,
}

fn init() {
    let level = get_log_level();
    let filter = filter::Targets::new().with_targets(vec![
        ("packetloss", level),
        ("tower_http", level),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init();
    let args = Args::parse();
    trace!("started with args: {args:?}");

    info!("setting up...");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::default(),
    };
    let config = config.resolve().context("invalid configuration")?;

    let recorder = PrometheusRecorder::new().context("failed to register metrics")?;

    spawn_metrics_server(
        metrics_bind(config.metrics_bind),
        ApiState::new(recorder.clone(), config.endpoints.clone()),
    )
    .await?;

    let transport = HttpTransport::new(config.timeout, config.method)?;
    let probe = Probe::new(Arc::new(transport), Arc::new(recorder), config.timeout);
    let round = ProbeRound::new(probe, config.endpoints.clone()).with_max_in_flight(config.max_in_flight);

    let scheduler = SchedulerHandle::spawn(round, config.interval);

    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the scheduler simply runs until the process is killed
        error!("failed to listen for shutdown signal: {e}");
        scheduler.stopped().await;
    }

    info!("shutting down, draining in-flight probes");
    scheduler.shutdown().await;

    Ok(())
}
