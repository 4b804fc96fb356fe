// Tracker service - One fetch/extract/record pass plus chart generation
use crate::application::chart_renderer::{ChartOutcome, ChartRenderer, VisualizeError};
use crate::application::page_source::PageSource;
use crate::application::reading_store::{ReadingStore, RecordError};
use crate::domain::pool::Pool;
use crate::domain::reading::Reading;
use crate::infrastructure::page_parser::{self, ExtractError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StageError {
    // The fetch is shared by all pools, so the failure is carried per pool
    // as its message rather than by moving the one error around.
    #[error("page fetch failed: {0}")]
    Fetch(String),
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

#[derive(Debug)]
pub struct PoolOutcome {
    pub pool_id: String,
    pub collected: Result<Reading, StageError>,
    pub chart: Result<ChartOutcome, VisualizeError>,
}

impl PoolOutcome {
    pub fn is_ok(&self) -> bool {
        self.collected.is_ok() && self.chart.is_ok()
    }
}

/// Per-pool results of one full pass. Failures are collected here instead
/// of crossing pool boundaries.
#[derive(Debug)]
pub struct PassReport {
    pub pools: Vec<PoolOutcome>,
}

impl PassReport {
    pub fn all_ok(&self) -> bool {
        self.pools.iter().all(PoolOutcome::is_ok)
    }
}

pub struct TrackerService {
    page: Arc<dyn PageSource>,
    store: Arc<dyn ReadingStore>,
    charts: Arc<dyn ChartRenderer>,
    pools: Vec<Pool>,
}

impl TrackerService {
    pub fn new(
        page: Arc<dyn PageSource>,
        store: Arc<dyn ReadingStore>,
        charts: Arc<dyn ChartRenderer>,
        pools: Vec<Pool>,
    ) -> Self {
        Self {
            page,
            store,
            charts,
            pools,
        }
    }

    /// Run one pass: a single shared fetch, then extract and record per
    /// pool, then regenerate every pool's chart. One pool failing never
    /// stops the others, and never stops the chart stage.
    pub async fn run_pass(&self) -> PassReport {
        let collected = self.collect_readings().await;
        let charted = self.render_charts().await;

        let pools = self
            .pools
            .iter()
            .zip(collected.into_iter().zip(charted))
            .map(|(pool, (collected, chart))| PoolOutcome {
                pool_id: pool.id.clone(),
                collected,
                chart,
            })
            .collect();

        let report = PassReport { pools };
        if report.all_ok() {
            tracing::info!("pass complete, all pools ok");
        } else {
            tracing::warn!("pass complete with failures");
        }
        report
    }

    async fn collect_readings(&self) -> Vec<Result<Reading, StageError>> {
        let body = match self.page.fetch().await {
            Ok(body) => {
                tracing::info!("fetched status page ({} bytes)", body.len());
                body
            }
            Err(e) => {
                tracing::error!("status page fetch failed: {e}");
                return self
                    .pools
                    .iter()
                    .map(|_| Err(StageError::Fetch(e.to_string())))
                    .collect();
            }
        };

        let mut results = Vec::with_capacity(self.pools.len());
        for pool in &self.pools {
            results.push(self.collect_one(pool, &body).await);
        }
        results
    }

    async fn collect_one(&self, pool: &Pool, body: &str) -> Result<Reading, StageError> {
        let count = match page_parser::extract_count(body, &pool.label) {
            Ok(count) => {
                tracing::info!("Found guest count for {}: {}", pool.name, count);
                count
            }
            Err(e) => {
                tracing::warn!("no reading for {}: {e}", pool.name);
                return Err(e.into());
            }
        };

        let reading = Reading::now(count);
        self.store.append(pool, &reading).await.map_err(|e| {
            tracing::error!("failed to record reading for {}: {e}", pool.name);
            e
        })?;
        tracing::info!("Data collected for {}: {} guests", pool.name, count);
        Ok(reading)
    }

    /// Repeat passes until `shutdown` completes, sleeping `interval`
    /// between them. The shutdown future is polled across the whole run
    /// but only observed between passes, so an in-flight pass always
    /// completes and no partial CSV row is left behind. Returns whether
    /// the last pass was clean.
    pub async fn run_until<F>(&self, interval: Duration, shutdown: F) -> bool
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        loop {
            let clean = self.run_pass().await.all_ok();
            tracing::info!("Sleeping for {} seconds...", interval.as_secs());
            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested, exiting");
                    return clean;
                }
            }
        }
    }

    /// Regenerate every pool's chart from its stored readings. Also the
    /// whole body of visualize-only mode.
    pub async fn render_charts(&self) -> Vec<Result<ChartOutcome, VisualizeError>> {
        let mut results = Vec::with_capacity(self.pools.len());
        for pool in &self.pools {
            results.push(self.render_one(pool).await);
        }
        results
    }

    async fn render_one(&self, pool: &Pool) -> Result<ChartOutcome, VisualizeError> {
        tracing::info!("Generating visualization for {}...", pool.name);
        let readings = self.store.load_all(pool).await.map_err(VisualizeError::Load)?;
        let outcome = self.charts.render(pool, &readings).await?;
        match &outcome {
            ChartOutcome::Rendered { points } => {
                tracing::info!("visualization for {} written ({points} points)", pool.name);
            }
            ChartOutcome::Skipped => {
                tracing::warn!("no data for {}, no visualization generated", pool.name);
            }
        }
        Ok(outcome)
    }
}
