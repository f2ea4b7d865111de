//! Prepare episode use case

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use crate::domain::episode::EpisodePost;
use crate::domain::error::EpisodeError;

use super::ports::{EditorLauncher, NextEpisodeSource};

/// Errors from the prepare episode use case
#[derive(Debug, Error)]
pub enum PostError {
    #[error("error getting next episode number: {0}")]
    Episode(#[from] EpisodeError),

    #[error("error creating posts directory {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("error creating file {path}: {message}")]
    Write { path: String, message: String },
}

/// Input parameters for the prepare episode use case
#[derive(Debug, Clone)]
pub struct PrepareEpisodeInput {
    /// Directory the post is written to, created if missing
    pub posts_location: PathBuf,
    /// Date written into the post front matter
    pub date: NaiveDateTime,
}

/// Output from the prepare episode use case
#[derive(Debug, Clone)]
pub struct PrepareEpisodeOutput {
    pub number: u32,
    pub path: PathBuf,
    /// Whether the editor was started on the new post
    pub editor_opened: bool,
}

/// Creates the post for the next episode
pub struct PrepareEpisodeUseCase<S, E>
where
    S: NextEpisodeSource,
    E: EditorLauncher,
{
    source: S,
    editor: Option<E>,
}

impl<S, E> PrepareEpisodeUseCase<S, E>
where
    S: NextEpisodeSource,
    E: EditorLauncher,
{
    /// Create a new use case instance; `editor` of `None` skips opening the post
    pub fn new(source: S, editor: Option<E>) -> Self {
        Self { source, editor }
    }

    /// Resolve the next episode number and write its post
    pub async fn execute(
        &self,
        input: PrepareEpisodeInput,
    ) -> Result<PrepareEpisodeOutput, PostError> {
        info!(location = %input.posts_location.display(), "create episode");

        let number = self.source.next_episode().await?;
        info!(episode = number, "new episode number");

        let post = EpisodePost::new(number, input.date);

        fs::create_dir_all(&input.posts_location)
            .await
            .map_err(|e| PostError::CreateDir {
                path: input.posts_location.display().to_string(),
                message: e.to_string(),
            })?;

        let path = input.posts_location.join(post.file_name());
        info!(file = %path.display(), "create episode file");
        fs::write(&path, post.render())
            .await
            .map_err(|e| PostError::Write {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        // Opening the editor is a convenience; the post is already written
        let editor_opened = match &self.editor {
            Some(editor) => match editor.open(&path).await {
                Ok(()) => true,
                Err(e) => {
                    warn!(error = %e, "failed to open editor");
                    false
                }
            },
            None => false,
        };

        Ok(PrepareEpisodeOutput {
            number,
            path,
            editor_opened,
        })
    }
}
