// Main entry point - Dependency injection and mode dispatch
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::application::tracker_service::TrackerService;
use crate::domain::pool::Pool;
use crate::infrastructure::config::load_tracker_config;
use crate::infrastructure::csv_store::CsvReadingStore;
use crate::infrastructure::http_source::HttpPageSource;
use crate::infrastructure::trend_chart::TrendChartRenderer;
use crate::presentation::cli::{Cli, Mode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let tracker_config = load_tracker_config(&cli.config)
        .with_context(|| format!("failed to load config {:?}", cli.config))?;

    let data_dir = PathBuf::from(&tracker_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {:?}", data_dir))?;

    let pools: Vec<Pool> = tracker_config.pools.iter().cloned().map(Pool::from).collect();

    let page = Arc::new(HttpPageSource::new(
        tracker_config.source.url.clone(),
        Duration::from_secs(tracker_config.source.timeout_secs),
        &tracker_config.source.user_agent,
    )?);
    let store = Arc::new(CsvReadingStore::new(data_dir.clone()));
    let charts = Arc::new(TrendChartRenderer::new(data_dir));
    let service = TrackerService::new(page, store, charts, pools);

    let clean = match cli.mode() {
        Mode::VisualizeOnly => service.render_charts().await.iter().all(Result::is_ok),
        Mode::Once => service.run_pass().await.all_ok(),
        Mode::Continuous { interval } => {
            tracing::info!(
                "Starting pool guest count tracker, one pass every {} minutes",
                interval.as_secs() / 60
            );
            // Spawning polls the signal future right away, so the handler
            // is installed before the first pass and a Ctrl-C arriving
            // mid-pass is held until the loop's next select point.
            let ctrl_c = tokio::spawn(tokio::signal::ctrl_c());
            service
                .run_until(interval, async move {
                    let _ = ctrl_c.await;
                    tracing::info!("interrupt received");
                })
                .await
        }
    };

    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
