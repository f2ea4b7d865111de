//! Episode page resolver adapter

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::NextEpisodeSource;
use crate::domain::episode::{scan_episode_page, EpisodePattern};
use crate::domain::error::EpisodeError;

/// Request timeout for the episode page
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Resolves the next episode number from the podcast's public page
pub struct PageEpisodeResolver {
    url: String,
    pattern: EpisodePattern,
    client: reqwest::Client,
}

impl PageEpisodeResolver {
    /// Create a resolver for `url`
    pub fn new(url: impl Into<String>, pattern: EpisodePattern) -> Result<Self, EpisodeError> {
        let client = reqwest::Client::builder()
            .timeout(PAGE_TIMEOUT)
            .build()
            .map_err(|e| EpisodeError::Request(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            pattern,
            client,
        })
    }
}

#[async_trait]
impl NextEpisodeSource for PageEpisodeResolver {
    async fn next_episode(&self) -> Result<u32, EpisodeError> {
        debug!(url = %self.url, pattern = %self.pattern, "fetch episode page");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| EpisodeError::Request(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(EpisodeError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| EpisodeError::Request(format!("error reading response body: {}", e)))?;

        scan_episode_page(&body, &self.pattern)
    }
}
