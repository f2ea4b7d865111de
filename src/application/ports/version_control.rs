//! Version control port interface

use async_trait::async_trait;
use thiserror::Error;

/// Version control errors
#[derive(Debug, Clone, Error)]
pub enum VcsError {
    #[error("failed to run {command}: {message}")]
    Spawn { command: String, message: String },

    #[error("{command} exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Port for the repository holding the generated site content
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Fetch and merge upstream changes.
    async fn pull(&self) -> Result<(), VcsError>;

    /// Machine-readable working tree status; empty when clean.
    async fn status(&self) -> Result<String, VcsError>;

    /// Stage every change in the working tree.
    async fn add_all(&self) -> Result<(), VcsError>;

    /// Commit staged changes.
    async fn commit(&self, message: &str) -> Result<(), VcsError>;

    /// Push to the upstream branch.
    async fn push(&self) -> Result<(), VcsError>;
}
