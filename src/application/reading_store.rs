// Store trait for per-pool reading records
use crate::domain::pool::Pool;
use crate::domain::reading::Reading;
use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("i/o on record file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Append-only persistence for pool readings.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Append exactly one reading to the pool's record file, creating the
    /// file with its header if absent.
    async fn append(&self, pool: &Pool, reading: &Reading) -> Result<(), RecordError>;

    /// Load every stored reading for the pool, in file order. A missing
    /// record file yields an empty list, not an error.
    async fn load_all(&self, pool: &Pool) -> Result<Vec<Reading>, RecordError>;
}
