//! Deploy use case

use thiserror::Error;
use tracing::info;

use crate::domain::deploy::{mkdir_command, purge_command, DeployRequest};

use super::ports::{RemoteError, RemoteShell};

/// Errors from the deploy use case, one per step
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("error creating remote directory: {0}")]
    CreateDir(RemoteError),

    #[error("error copying file to remote server: {0}")]
    Upload(RemoteError),

    #[error("error deleting old files on remote server: {0}")]
    Purge(RemoteError),

    #[error("error creating archive directory on archive server: {0}")]
    CreateArchiveDir(RemoteError),

    #[error("error copying file to archive server: {0}")]
    ArchiveUpload(RemoteError),
}

/// Uploads an episode to the primary and archive hosts.
///
/// Steps run strictly in order and the first failure ends the deploy.
/// Completed steps are not rolled back.
pub struct DeployUseCase<R: RemoteShell> {
    remote: R,
}

impl<R: RemoteShell> DeployUseCase<R> {
    pub fn new(remote: R) -> Self {
        Self { remote }
    }

    pub async fn execute(&self, request: &DeployRequest) -> Result<(), DeployError> {
        info!(
            file = %request.file.display(),
            host = %request.host,
            archive_host = %request.archive_host,
            "deploy"
        );

        self.remote
            .run(&request.host, &mkdir_command(&request.location))
            .await
            .map_err(DeployError::CreateDir)?;

        self.remote
            .upload(&request.host, &request.file, &request.location)
            .await
            .map_err(DeployError::Upload)?;

        self.remote
            .run(
                &request.host,
                &purge_command(&request.location, request.days_keep),
            )
            .await
            .map_err(DeployError::Purge)?;

        self.remote
            .run(
                &request.archive_host,
                &mkdir_command(&request.archive_location),
            )
            .await
            .map_err(DeployError::CreateArchiveDir)?;

        self.remote
            .upload(
                &request.archive_host,
                &request.file,
                &request.archive_location,
            )
            .await
            .map_err(DeployError::ArchiveUpload)?;

        Ok(())
    }
}
