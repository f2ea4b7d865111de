//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

use crate::domain::config::{AppConfig, DeployConfig, GitConfig, Mp3Config, PrepConfig};
use crate::domain::deploy::HostKeyPolicy;

/// Podcast publisher - tag, prepare, deploy and commit episodes
#[derive(Parser, Debug)]
#[command(name = "podcast-publisher")]
#[command(version)]
#[command(about = "Tag, prepare, deploy and commit podcast episodes")]
#[command(long_about = None)]
pub struct Cli {
    /// Debug mode
    #[arg(
        long,
        global = true,
        env = "DEBUG",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub dbg: bool,

    /// Config file path
    #[arg(long, global = true, value_name = "PATH", env = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set ID3 tags on an episode file
    Mp3(Mp3Args),
    /// Upload an episode to the primary and archive servers
    Deploy(DeployArgs),
    /// Create the post for the next episode
    Prep(PrepArgs),
    /// Commit and push site changes
    Git(GitArgs),
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Mp3(_) => "mp3",
            Commands::Deploy(_) => "deploy",
            Commands::Prep(_) => "prep",
            Commands::Git(_) => "git",
        }
    }

    /// Config overlay built from flags and their environment variables
    pub fn overlay(&self) -> AppConfig {
        match self {
            Commands::Mp3(args) => AppConfig {
                mp3: args.overlay(),
                ..Default::default()
            },
            Commands::Deploy(args) => AppConfig {
                deploy: args.overlay(),
                ..Default::default()
            },
            Commands::Prep(args) => AppConfig {
                prep: args.overlay(),
                ..Default::default()
            },
            Commands::Git(args) => AppConfig {
                git: args.overlay(),
                ..Default::default()
            },
        }
    }
}

#[derive(Args, Debug)]
pub struct Mp3Args {
    /// Episode mp3 file
    #[arg(short, long, value_name = "FILE", env = "FILE")]
    pub file: PathBuf,

    /// Title prefix, the episode number is appended
    #[arg(long, env = "TITLE")]
    pub title: Option<String>,

    #[arg(long, env = "ARTIST")]
    pub artist: Option<String>,

    #[arg(long, env = "ALBUM")]
    pub album: Option<String>,

    /// Cover image, replaces the bundled one
    #[arg(long, value_name = "PATH", env = "IMAGE")]
    pub image: Option<PathBuf>,

    /// Episode number pattern with one capturing group
    #[arg(long, value_name = "REGEX", env = "RE_EPISODE")]
    pub re_episode: Option<String>,
}

impl Mp3Args {
    fn overlay(&self) -> Mp3Config {
        Mp3Config {
            title: self.title.clone(),
            artist: self.artist.clone(),
            album: self.album.clone(),
            image: self.image.clone(),
            re_episode: self.re_episode.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Episode mp3 file
    #[arg(short, long, value_name = "FILE", env = "FILE")]
    pub file: PathBuf,

    /// Primary host
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// SSH user for both hosts. Read from $USER, which takes precedence over the config file
    #[arg(long, env = "USER")]
    pub user: Option<String>,

    /// Media directory on the primary host
    #[arg(long, env = "LOCATION")]
    pub location: Option<String>,

    /// Days to keep old episodes on the primary host
    #[arg(long, value_name = "DAYS", env = "DAYS_KEEP")]
    pub days_keep: Option<u32>,

    #[arg(long, env = "ARCHIVE_HOST")]
    pub archive_host: Option<String>,

    /// Media directory on the archive host
    #[arg(long, env = "ARCHIVE_LOCATION")]
    pub archive_location: Option<String>,

    /// Private key file
    #[arg(long, value_name = "PATH", env = "KEY")]
    pub key: Option<PathBuf>,

    /// Server host key check
    #[arg(long, value_name = "POLICY", env = "HOST_KEY_POLICY")]
    pub host_key_policy: Option<HostKeyPolicyArg>,
}

impl DeployArgs {
    fn overlay(&self) -> DeployConfig {
        DeployConfig {
            host: self.host.clone(),
            user: self.user.clone(),
            location: self.location.clone(),
            days_keep: self.days_keep,
            archive_host: self.archive_host.clone(),
            archive_location: self.archive_location.clone(),
            key: self.key.clone(),
            host_key_policy: self
                .host_key_policy
                .map(|p| HostKeyPolicy::from(p).to_string()),
        }
    }
}

#[derive(Args, Debug)]
pub struct PrepArgs {
    /// Episode number pattern with one capturing group
    #[arg(long, value_name = "REGEX", env = "RE_EPISODE")]
    pub re_episode: Option<String>,

    /// Page listing published episodes
    #[arg(long, value_name = "URL", env = "PAGE_URL")]
    pub page_url: Option<String>,

    /// Directory the post is written to
    #[arg(long, value_name = "PATH", env = "POSTS_LOCATION")]
    pub posts_location: Option<PathBuf>,

    /// Editor opened on the new post, empty to skip
    #[arg(long, env = "EDITOR")]
    pub editor: Option<String>,
}

impl PrepArgs {
    fn overlay(&self) -> PrepConfig {
        PrepConfig {
            re_episode: self.re_episode.clone(),
            page_url: self.page_url.clone(),
            posts_location: self.posts_location.clone(),
            editor: self.editor.clone(),
        }
    }
}

#[derive(Args, Debug)]
pub struct GitArgs {
    /// Repository working tree
    #[arg(long, value_name = "PATH", env = "REPO_LOCATION")]
    pub repo_location: Option<PathBuf>,
}

impl GitArgs {
    fn overlay(&self) -> GitConfig {
        GitConfig {
            repo_location: self.repo_location.clone(),
        }
    }
}

/// Host key policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum HostKeyPolicyArg {
    /// Accept any server key
    AcceptAny,
    /// Require the key to be in ~/.ssh/known_hosts
    KnownHosts,
}

impl From<HostKeyPolicyArg> for HostKeyPolicy {
    fn from(arg: HostKeyPolicyArg) -> Self {
        match arg {
            HostKeyPolicyArg::AcceptAny => HostKeyPolicy::AcceptAny,
            HostKeyPolicyArg::KnownHosts => HostKeyPolicy::KnownHosts,
        }
    }
}
