//! Tag container port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::tags::EpisodeTags;

/// Tag container errors
#[derive(Debug, Clone, Error)]
pub enum TagStoreError {
    #[error("error reading tags from {path}: {message}")]
    Read { path: String, message: String },

    #[error("error saving ID3 tags to {path}: {message}")]
    Write { path: String, message: String },
}

/// Port for writing an audio file's tag container
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Write `tags` into the file in place.
    ///
    /// Frames not covered by `tags` are kept. The file's modification time
    /// is left as it was before the write.
    async fn write(&self, path: &Path, tags: &EpisodeTags) -> Result<(), TagStoreError>;
}
