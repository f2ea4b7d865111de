//! Episode tag value objects

use std::path::PathBuf;

use crate::domain::episode::EpisodePattern;

/// Genre written to every episode
pub const PODCAST_GENRE: &str = "Podcast";

/// Cover image bundled into the binary, used when no override is given
pub const DEFAULT_COVER: &[u8] = include_bytes!("../../assets/cover.jpg");

/// Input for the mp3 tagging use case
#[derive(Debug, Clone)]
pub struct TagRequest {
    pub file: PathBuf,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Cover image override; the bundled cover is used when `None`
    pub image: Option<PathBuf>,
    pub episode_pattern: EpisodePattern,
}

/// Front cover picture embedded into the tag container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverImage {
    data: Vec<u8>,
}

impl CoverImage {
    pub const MIME_TYPE: &'static str = "image/jpeg";
    pub const DESCRIPTION: &'static str = "Front cover";

    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// The cover bundled into the binary
    pub fn bundled() -> Self {
        Self::new(DEFAULT_COVER.to_vec())
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Complete set of tags written to an episode file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeTags {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub year: i32,
    pub genre: String,
    pub cover: CoverImage,
}

impl EpisodeTags {
    /// Build tags for episode `number` of `request`
    pub fn build(request: &TagRequest, number: u32, year: i32, cover: CoverImage) -> Self {
        Self {
            title: format!("{} {}", request.title, number),
            artist: request.artist.clone(),
            album: request.album.clone(),
            year,
            genre: PODCAST_GENRE.to_string(),
            cover,
        }
    }
}
