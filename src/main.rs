//! Command-line entry point: `gas_station <config.json>`.
//!
//! Runs one simulation described by a JSON configuration file, writes the
//! event log into the configured directory and prints the final report.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing::{error, info, info_span};
use uuid::Uuid;

use gas_station::builders::build_simulation;
use gas_station::config::SimulationConfig;
use gas_station::core::AppResult;
use gas_station::infra::FileEventSink;
use gas_station::util::init_tracing;

fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let result = run();
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "simulation aborted");
    }
    result
}

fn run() -> AppResult<()> {
    let path = std::env::args()
        .nth(1)
        .context("configuration file path was not provided")?;
    let config = SimulationConfig::from_path(&path)
        .map_err(|e| anyhow!(e))
        .with_context(|| format!("loading configuration from {path}"))?;

    let run_id = Uuid::new_v4();
    let span = info_span!("simulation", %run_id);
    let _enter = span.enter();

    let sink = Arc::new(
        FileEventSink::open(&config.log, config.catalog()).context("opening event log")?,
    );
    let report = build_simulation(&config, sink.clone())?.run()?;
    let lines = sink.close().context("closing event log")?;

    info!(
        lines,
        directory = %sink.directory().display(),
        "event log written"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
