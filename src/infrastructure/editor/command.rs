//! External editor command adapter

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::application::ports::{EditorError, EditorLauncher};

/// Starts an editor program with the file path as its only argument
pub struct CommandEditor {
    program: String,
}

impl CommandEditor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl EditorLauncher for CommandEditor {
    async fn open(&self, path: &Path) -> Result<(), EditorError> {
        // The child is not awaited; dropping the handle leaves it running
        let child = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EditorError::NotFound(self.program.clone())
                } else {
                    EditorError::LaunchFailed {
                        editor: self.program.clone(),
                        message: e.to_string(),
                    }
                }
            })?;

        debug!(editor = %self.program, pid = ?child.id(), file = %path.display(), "editor started");
        Ok(())
    }
}
