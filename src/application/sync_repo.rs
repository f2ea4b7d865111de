//! Repository sync use case

use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::info;

use crate::domain::sync::{commit_message, SyncOutcome};

use super::ports::{VcsError, VersionControl};

/// Errors from the repository sync use case
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("error pulling changes: {0}")]
    Pull(VcsError),

    #[error("error getting git status: {0}")]
    Status(VcsError),

    #[error("error adding changes: {0}")]
    Add(VcsError),

    #[error("error committing changes: {0}")]
    Commit(VcsError),

    #[error("error pushing changes: {0}")]
    Push(VcsError),
}

/// Pulls the content repository and commits any local changes
pub struct SyncRepositoryUseCase<V: VersionControl> {
    vcs: V,
}

impl<V: VersionControl> SyncRepositoryUseCase<V> {
    pub fn new(vcs: V) -> Self {
        Self { vcs }
    }

    /// Pull, then stage, commit and push if the working tree is dirty.
    /// `now` goes into the commit message.
    pub async fn execute(&self, now: NaiveDateTime) -> Result<SyncOutcome, SyncError> {
        self.vcs.pull().await.map_err(SyncError::Pull)?;

        let status = self.vcs.status().await.map_err(SyncError::Status)?;
        let changes: Vec<String> = status
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        if changes.is_empty() {
            info!("no changes found");
            return Ok(SyncOutcome::Clean);
        }
        info!(count = changes.len(), "changes found");
        for change in &changes {
            info!(%change, "pending");
        }

        self.vcs.add_all().await.map_err(SyncError::Add)?;

        let message = commit_message(now);
        self.vcs
            .commit(&message)
            .await
            .map_err(SyncError::Commit)?;

        self.vcs.push().await.map_err(SyncError::Push)?;

        Ok(SyncOutcome::Committed { message, changes })
    }
}
