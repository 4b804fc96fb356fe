// HTTP page source implementation
use crate::application::page_source::{FetchError, PageSource};
use anyhow::Context;
use async_trait::async_trait;
use std::time::Duration;

pub struct HttpPageSource {
    client: reqwest::Client,
    url: String,
}

impl HttpPageSource {
    pub fn new(url: String, timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        // An explicit user agent; the site rejects empty/default agents.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Transport {
            url: self.url.clone(),
            source,
        })
    }
}
