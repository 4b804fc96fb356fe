// Renderer trait for per-pool trend charts
use crate::application::reading_store::RecordError;
use crate::domain::pool::Pool;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("failed to load readings for chart: {0}")]
    Load(#[from] RecordError),
    #[error("chart rendering failed: {0}")]
    Render(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    /// Chart image written, with the number of data points plotted.
    Rendered { points: usize },
    /// No stored data at all for this pool; no image written.
    Skipped,
}

/// Generate a trend chart image from a pool's stored readings.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render the trailing 7-day window of `readings` to the pool's chart
    /// image path, overwriting any previous image.
    async fn render(&self, pool: &Pool, readings: &[Reading])
        -> Result<ChartOutcome, VisualizeError>;
}
