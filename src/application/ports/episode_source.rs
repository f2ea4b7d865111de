//! Episode number source port interface

use async_trait::async_trait;

use crate::domain::error::EpisodeError;

/// Port for resolving the number of the next episode
#[async_trait]
pub trait NextEpisodeSource: Send + Sync {
    /// Number the next episode should get.
    async fn next_episode(&self) -> Result<u32, EpisodeError>;
}
