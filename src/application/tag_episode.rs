//! Tag episode use case

use std::path::PathBuf;

use chrono::{DateTime, Datelike, Local};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::domain::episode::episode_from_file;
use crate::domain::error::EpisodeError;
use crate::domain::tags::{CoverImage, EpisodeTags, TagRequest};

use super::ports::{TagStore, TagStoreError};

/// Errors from the tag episode use case
#[derive(Debug, Error)]
pub enum TagError {
    #[error(transparent)]
    Episode(#[from] EpisodeError),

    #[error("error getting file info {path}: {message}")]
    Metadata { path: String, message: String },

    #[error("error reading image file {path}: {message}")]
    Image { path: String, message: String },

    #[error(transparent)]
    Store(#[from] TagStoreError),
}

/// Output from the tag episode use case
#[derive(Debug, Clone)]
pub struct TagEpisodeOutput {
    pub file: PathBuf,
    pub number: u32,
    pub tags: EpisodeTags,
}

/// Sets title, artist, album, year, genre and cover on an episode file
pub struct TagEpisodeUseCase<S: TagStore> {
    store: S,
}

impl<S: TagStore> TagEpisodeUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Tag the requested file in place.
    ///
    /// The year comes from the file's modification time, so re-tagging an
    /// old episode does not move it to the current year.
    pub async fn execute(&self, request: &TagRequest) -> Result<TagEpisodeOutput, TagError> {
        info!(file = %request.file.display(), "set mp3 tags");

        let number = episode_from_file(&request.file, &request.episode_pattern)?;

        let metadata = fs::metadata(&request.file)
            .await
            .map_err(|e| TagError::Metadata {
                path: request.file.display().to_string(),
                message: e.to_string(),
            })?;
        let modified = metadata.modified().map_err(|e| TagError::Metadata {
            path: request.file.display().to_string(),
            message: e.to_string(),
        })?;
        let modified: DateTime<Local> = modified.into();
        debug!(
            file = %request.file.display(),
            modified = %modified.to_rfc3339(),
            size = metadata.len(),
            "file info"
        );

        let cover = match &request.image {
            Some(image) => {
                let data = fs::read(image).await.map_err(|e| TagError::Image {
                    path: image.display().to_string(),
                    message: e.to_string(),
                })?;
                CoverImage::new(data)
            }
            None => CoverImage::bundled(),
        };

        let tags = EpisodeTags::build(request, number, modified.year(), cover);
        self.store.write(&request.file, &tags).await?;

        info!(episode = number, title = %tags.title, "tags saved");
        Ok(TagEpisodeOutput {
            file: request.file.clone(),
            number,
            tags,
        })
    }
}
