//! git command line adapter

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{VcsError, VersionControl};

/// Runs the `git` binary inside a working tree
pub struct GitCli {
    repo: PathBuf,
    program: String,
}

impl GitCli {
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self {
            repo: repo.into(),
            program: "git".to_string(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<String, VcsError> {
        let command = format!("{} {}", self.program, args.join(" "));
        debug!(%command, repo = %self.repo.display(), "run");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(&self.repo)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| VcsError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(VcsError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !stdout.trim().is_empty() {
            debug!(%command, output = %stdout.trim_end(), "git output");
        }
        Ok(stdout)
    }
}

#[async_trait]
impl VersionControl for GitCli {
    async fn pull(&self) -> Result<(), VcsError> {
        self.git(&["pull"]).await.map(|_| ())
    }

    async fn status(&self) -> Result<String, VcsError> {
        self.git(&["status", "--porcelain"]).await
    }

    async fn add_all(&self) -> Result<(), VcsError> {
        self.git(&["add", "."]).await.map(|_| ())
    }

    async fn commit(&self, message: &str) -> Result<(), VcsError> {
        self.git(&["commit", "-m", message]).await.map(|_| ())
    }

    async fn push(&self) -> Result<(), VcsError> {
        self.git(&["push"]).await.map(|_| ())
    }
}
