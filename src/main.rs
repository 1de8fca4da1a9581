//! geoBatch - Batch IP Geolocation with Hexagonal Architecture
//!
//! This is the composition root that wires together all the components.

mod adapters;
mod application;
mod config;
mod domain;

use crate::adapters::outbound::{CsvIpSource, CsvRecordSink, HttpGeoResolver};
use crate::application::BatchService;
use crate::config::load_config;
use crate::domain::ports::{IpSource, RecordSink};
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging to both console and log file
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let file_appender = tracing_appender::rolling::never(".", "geocode_log.log");
    let (log_file, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::from_level(log_level))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(log_file),
        )
        .init();

    tracing::info!(
        "starting geoBatch endpoint={} input={} output={}",
        cfg.api_url,
        cfg.input_path,
        cfg.output_path
    );

    // ===== COMPOSITION ROOT =====
    // Wire up all adapters and services

    // Input source (CSV)
    let source = CsvIpSource::new(&cfg.input_path);
    if !source.exists() {
        tracing::error!("the input file {} does not exist", cfg.input_path);
        anyhow::bail!("input file {} does not exist", cfg.input_path);
    }
    let ips = source.load()?;

    // Geolocation resolver (remote HTTP API)
    let resolver = Arc::new(HttpGeoResolver::new(
        cfg.api_url.clone(),
        cfg.api_key.clone(),
    ));

    // Batch driver
    let service = BatchService::new(resolver);
    let batch = service.process(&ips).await;

    // Output sink (CSV)
    let sink = CsvRecordSink::new(&cfg.output_path);
    sink.persist(&batch)?;
    tracing::info!("geolocation data saved to {}", cfg.output_path);

    Ok(())
}
