// Source trait for the shared pool status page
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected status {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Provider of the raw status page body. Both pools' counts are embedded in
/// one page, so a single fetch serves a whole pass.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the current page body as text.
    async fn fetch(&self) -> Result<String, FetchError>;
}
