//! Remote shell port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Remote shell and transfer errors
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("unable to read private key {path}: {message}")]
    KeyRead { path: String, message: String },

    #[error("unable to parse private key {path}: {message}")]
    KeyParse { path: String, message: String },

    #[error("failed to dial {host}: {message}")]
    Connect { host: String, message: String },

    #[error("authentication as {user} rejected by {host}")]
    AuthRejected { host: String, user: String },

    #[error("session error on {host}: {message}")]
    Session { host: String, message: String },

    #[error("command {command:?} on {host} failed with status {status}: {stderr}")]
    CommandFailed {
        host: String,
        command: String,
        status: u32,
        stderr: String,
    },

    #[error("failed to open local file {path}: {message}")]
    LocalFile { path: String, message: String },

    #[error("failed to transfer {path} to {host}: {message}")]
    Transfer {
        host: String,
        path: String,
        message: String,
    },
}

/// Port for running commands on and copying files to remote hosts
#[async_trait]
pub trait RemoteShell: Send + Sync {
    /// Run a shell command on `host`; a non-zero exit status is an error.
    async fn run(&self, host: &str, command: &str) -> Result<(), RemoteError>;

    /// Copy `local_file` into `remote_dir` on `host`, keeping its file name.
    async fn upload(&self, host: &str, local_file: &Path, remote_dir: &str)
        -> Result<(), RemoteError>;
}
