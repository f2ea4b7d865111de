//! Application configuration value object

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::deploy::{DeployRequest, HostKeyPolicy};
use crate::domain::episode::{EpisodePattern, DEFAULT_EPISODE_PATTERN};
use crate::domain::error::{ConfigError, EpisodeError};
use crate::domain::tags::TagRequest;

/// Default page scanned for the latest episode number
pub const DEFAULT_PAGE_URL: &str = "https://podcast.umputun.com/";

/// `mp3` subcommand settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Mp3Config {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub image: Option<PathBuf>,
    pub re_episode: Option<String>,
}

impl Mp3Config {
    fn merge(self, other: Self) -> Self {
        Self {
            title: other.title.or(self.title),
            artist: other.artist.or(self.artist),
            album: other.album.or(self.album),
            image: other.image.or(self.image),
            re_episode: other.re_episode.or(self.re_episode),
        }
    }
}

/// `deploy` subcommand settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeployConfig {
    pub host: Option<String>,
    pub user: Option<String>,
    pub location: Option<String>,
    pub days_keep: Option<u32>,
    pub archive_host: Option<String>,
    pub archive_location: Option<String>,
    pub key: Option<PathBuf>,
    pub host_key_policy: Option<String>,
}

impl DeployConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            host: other.host.or(self.host),
            user: other.user.or(self.user),
            location: other.location.or(self.location),
            days_keep: other.days_keep.or(self.days_keep),
            archive_host: other.archive_host.or(self.archive_host),
            archive_location: other.archive_location.or(self.archive_location),
            key: other.key.or(self.key),
            host_key_policy: other.host_key_policy.or(self.host_key_policy),
        }
    }
}

/// `prep` subcommand settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrepConfig {
    pub re_episode: Option<String>,
    pub page_url: Option<String>,
    pub posts_location: Option<PathBuf>,
    /// Editor launched on the new post; empty disables it
    pub editor: Option<String>,
}

impl PrepConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            re_episode: other.re_episode.or(self.re_episode),
            page_url: other.page_url.or(self.page_url),
            posts_location: other.posts_location.or(self.posts_location),
            editor: other.editor.or(self.editor),
        }
    }
}

/// `git` subcommand settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GitConfig {
    pub repo_location: Option<PathBuf>,
}

impl GitConfig {
    fn merge(self, other: Self) -> Self {
        Self {
            repo_location: other.repo_location.or(self.repo_location),
        }
    }
}

/// Resolved `prep` settings
#[derive(Debug, Clone)]
pub struct PrepSettings {
    pub episode_pattern: EpisodePattern,
    pub page_url: String,
    pub posts_location: PathBuf,
    pub editor: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub mp3: Mp3Config,
    #[serde(default)]
    pub deploy: DeployConfig,
    #[serde(default)]
    pub prep: PrepConfig,
    #[serde(default)]
    pub git: GitConfig,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            mp3: Mp3Config {
                title: Some("UWP Выпуск".to_string()),
                artist: Some("Umputun".to_string()),
                album: Some("Eженедельный подкаст от Umputun".to_string()),
                image: None,
                re_episode: Some(DEFAULT_EPISODE_PATTERN.to_string()),
            },
            deploy: DeployConfig {
                host: Some("podcast.umputun.com".to_string()),
                user: Some("umputun".to_string()),
                location: Some("/srv/media".to_string()),
                days_keep: Some(700),
                archive_host: Some("archive.rucast.net".to_string()),
                archive_location: Some("/data/archive/uwp/media/".to_string()),
                key: dirs::home_dir().map(|home| home.join(".ssh").join("id_rsa")),
                host_key_policy: Some(HostKeyPolicy::default().to_string()),
            },
            prep: PrepConfig {
                re_episode: Some(DEFAULT_EPISODE_PATTERN.to_string()),
                page_url: Some(DEFAULT_PAGE_URL.to_string()),
                posts_location: Some(PathBuf::from("./hugo/content/posts")),
                editor: Some("subl".to_string()),
            },
            git: GitConfig {
                repo_location: Some(PathBuf::from(".")),
            },
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            mp3: self.mp3.merge(other.mp3),
            deploy: self.deploy.merge(other.deploy),
            prep: self.prep.merge(other.prep),
            git: self.git.merge(other.git),
        }
    }

    /// Build the tagging request for `file`
    pub fn tag_request(&self, file: PathBuf) -> Result<TagRequest, ConfigError> {
        let mp3 = &self.mp3;
        Ok(TagRequest {
            file,
            title: required(&mp3.title, "mp3.title")?,
            artist: required(&mp3.artist, "mp3.artist")?,
            album: required(&mp3.album, "mp3.album")?,
            image: mp3
                .image
                .as_deref()
                .filter(|p| !p.as_os_str().is_empty())
                .map(expand_home),
            episode_pattern: pattern(&mp3.re_episode, "mp3.re_episode")?,
        })
    }

    /// Build the deploy request for `file`
    pub fn deploy_request(&self, file: PathBuf) -> Result<DeployRequest, ConfigError> {
        let deploy = &self.deploy;
        let host_key_policy = required(&deploy.host_key_policy, "deploy.host_key_policy")?
            .parse::<HostKeyPolicy>()
            .map_err(|message| ConfigError::InvalidValue {
                key: "deploy.host_key_policy".to_string(),
                message,
            })?;
        let private_key = deploy
            .key
            .as_deref()
            .map(expand_home)
            .ok_or_else(|| not_set("deploy.key"))?;

        Ok(DeployRequest {
            file,
            host: required(&deploy.host, "deploy.host")?,
            user: required(&deploy.user, "deploy.user")?,
            location: required(&deploy.location, "deploy.location")?,
            days_keep: deploy.days_keep.ok_or_else(|| not_set("deploy.days_keep"))?,
            archive_host: required(&deploy.archive_host, "deploy.archive_host")?,
            archive_location: required(&deploy.archive_location, "deploy.archive_location")?,
            private_key,
            host_key_policy,
        })
    }

    /// Resolve the episode preparation settings
    pub fn prep_settings(&self) -> Result<PrepSettings, ConfigError> {
        let prep = &self.prep;
        Ok(PrepSettings {
            episode_pattern: pattern(&prep.re_episode, "prep.re_episode")?,
            page_url: required(&prep.page_url, "prep.page_url")?,
            posts_location: prep
                .posts_location
                .as_deref()
                .map(expand_home)
                .ok_or_else(|| not_set("prep.posts_location"))?,
            editor: prep
                .editor
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
        })
    }

    /// Resolve the repository location
    pub fn repo_location(&self) -> Result<PathBuf, ConfigError> {
        self.git
            .repo_location
            .as_deref()
            .map(expand_home)
            .ok_or_else(|| not_set("git.repo_location"))
    }
}

fn not_set(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: "value is not set".to_string(),
    }
}

fn required(value: &Option<String>, key: &str) -> Result<String, ConfigError> {
    value.clone().ok_or_else(|| not_set(key))
}

fn pattern(value: &Option<String>, key: &str) -> Result<EpisodePattern, ConfigError> {
    required(value, key)?
        .parse()
        .map_err(|e: EpisodeError| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })
}

/// Expand a leading `~/` to the home directory
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
