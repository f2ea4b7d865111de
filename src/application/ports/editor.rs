//! Editor port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Editor launch errors
#[derive(Debug, Clone, Error)]
pub enum EditorError {
    #[error("editor {0} not found")]
    NotFound(String),

    #[error("failed to launch editor {editor}: {message}")]
    LaunchFailed { editor: String, message: String },
}

/// Port for opening a generated file in an editor
#[async_trait]
pub trait EditorLauncher: Send + Sync {
    /// Start the editor on `path` without waiting for it to exit.
    async fn open(&self, path: &Path) -> Result<(), EditorError>;
}
