//! ID3 tag store adapter

use std::fs::File;
use std::io;
use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use id3::frame::{Picture, PictureType};
use id3::{ErrorKind, Tag, TagLike, Timestamp, Version};
use tracing::{debug, warn};

use crate::application::ports::{TagStore, TagStoreError};
use crate::domain::tags::{CoverImage, EpisodeTags};

/// Writes episode tags into the file's ID3 block using the `id3` crate
pub struct Id3TagStore {
    version: Version,
}

impl Id3TagStore {
    pub fn new() -> Self {
        Self {
            version: Version::Id3v24,
        }
    }
}

impl Default for Id3TagStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TagStore for Id3TagStore {
    async fn write(&self, path: &Path, tags: &EpisodeTags) -> Result<(), TagStoreError> {
        let path = path.to_path_buf();
        let tags = tags.clone();
        let version = self.version;
        let display = path.display().to_string();
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        tokio::task::spawn_blocking(move || {
            tracing::dispatcher::with_default(&dispatch, || write_tags(&path, &tags, version))
        })
        .await
        .map_err(|e| TagStoreError::Write {
            path: display,
            message: e.to_string(),
        })?
    }
}

fn write_tags(path: &Path, tags: &EpisodeTags, version: Version) -> Result<(), TagStoreError> {
    let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok();

    let mut tag = match Tag::read_from_path(path) {
        Ok(tag) => tag,
        Err(e) if matches!(e.kind, ErrorKind::NoTag) => {
            debug!(file = %path.display(), "no existing tag");
            Tag::new()
        }
        Err(e) => {
            return Err(TagStoreError::Read {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };

    tag.set_title(tags.title.as_str());
    tag.set_artist(tags.artist.as_str());
    tag.set_album(tags.album.as_str());
    // ID3v2.4 carries the year in TDRC; TYER only exists in v2.3
    tag.remove_year();
    tag.set_date_recorded(Timestamp {
        year: tags.year,
        month: None,
        day: None,
        hour: None,
        minute: None,
        second: None,
    });
    tag.set_genre(tags.genre.as_str());

    tag.remove_picture_by_type(PictureType::CoverFront);
    let _ = tag.add_frame(Picture {
        mime_type: CoverImage::MIME_TYPE.to_string(),
        picture_type: PictureType::CoverFront,
        description: CoverImage::DESCRIPTION.to_string(),
        data: tags.cover.data().to_vec(),
    });

    tag.write_to_path(path, version)
        .map_err(|e| TagStoreError::Write {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
    debug!(file = %path.display(), cover_size = tags.cover.len(), "tag written");

    if let Some(modified) = modified {
        if let Err(e) = restore_modified(path, modified) {
            warn!(file = %path.display(), error = %e, "failed to restore modification time");
        }
    }

    Ok(())
}

fn restore_modified(path: &Path, modified: SystemTime) -> io::Result<()> {
    File::options().write(true).open(path)?.set_modified(modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn tags(cover: &[u8]) -> EpisodeTags {
        EpisodeTags {
            title: "UWP Выпуск 571".to_string(),
            artist: "Umputun".to_string(),
            album: "Eженедельный подкаст от Umputun".to_string(),
            year: 2020,
            genre: "Podcast".to_string(),
            cover: CoverImage::new(cover.to_vec()),
        }
    }

    fn audio_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("ump_podcast571.mp3");
        std::fs::write(&path, [0xFFu8, 0xFB, 0x90, 0x64, 0x00, 0x00, 0x00, 0x00]).unwrap();
        path
    }

    #[tokio::test]
    async fn write_sets_all_fields() {
        let dir = TempDir::new().unwrap();
        let path = audio_file(&dir);

        Id3TagStore::new().write(&path, &tags(b"cover")).await.unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        assert_eq!(tag.title(), Some("UWP Выпуск 571"));
        assert_eq!(tag.artist(), Some("Umputun"));
        assert_eq!(tag.album(), Some("Eженедельный подкаст от Umputun"));
        assert_eq!(tag.date_recorded().map(|t| t.year), Some(2020));
        assert_eq!(tag.genre(), Some("Podcast"));

        let pictures: Vec<_> = tag.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].picture_type, PictureType::CoverFront);
        assert_eq!(pictures[0].mime_type, "image/jpeg");
        assert_eq!(pictures[0].data, b"cover");
    }

    #[tokio::test]
    async fn year_is_written_as_recording_date_frame() {
        let dir = TempDir::new().unwrap();
        let path = audio_file(&dir);

        let mut existing = Tag::new();
        existing.set_year(1999);
        existing.write_to_path(&path, Version::Id3v23).unwrap();

        Id3TagStore::new().write(&path, &tags(b"cover")).await.unwrap();

        let raw = std::fs::read(&path).unwrap();
        assert_eq!(&raw[..4], b"ID3\x04");
        assert!(raw.windows(4).any(|w| w == b"TDRC"));
        assert!(!raw.windows(4).any(|w| w == b"TYER"));
    }

    #[tokio::test]
    async fn rewrite_replaces_cover_and_keeps_other_frames() {
        let dir = TempDir::new().unwrap();
        let path = audio_file(&dir);

        let mut existing = Tag::new();
        existing.set_text("TCOM", "Bobuk");
        existing.write_to_path(&path, Version::Id3v24).unwrap();

        let store = Id3TagStore::new();
        store.write(&path, &tags(b"first")).await.unwrap();
        store.write(&path, &tags(b"second")).await.unwrap();

        let tag = Tag::read_from_path(&path).unwrap();
        let pictures: Vec<_> = tag.pictures().collect();
        assert_eq!(pictures.len(), 1);
        assert_eq!(pictures[0].data, b"second");
        assert_eq!(tag.get("TCOM").and_then(|f| f.content().text()), Some("Bobuk"));
    }

    #[tokio::test]
    async fn write_preserves_modification_time() {
        let dir = TempDir::new().unwrap();
        let path = audio_file(&dir);
        let old = UNIX_EPOCH + Duration::from_secs(1_592_179_200);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(old)
            .unwrap();

        Id3TagStore::new().write(&path, &tags(b"cover")).await.unwrap();

        let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(modified, old);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ump_podcast1.mp3");

        let err = Id3TagStore::new()
            .write(&path, &tags(b"cover"))
            .await
            .unwrap_err();

        assert!(matches!(err, TagStoreError::Read { .. }));
    }
}
