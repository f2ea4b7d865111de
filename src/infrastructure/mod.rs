//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the podcast site, SSH hosts and git.

pub mod config;
pub mod editor;
pub mod episode;
pub mod remote;
pub mod tags;
pub mod vcs;

// Re-export adapters
pub use config::XdgConfigStore;
pub use editor::CommandEditor;
pub use episode::PageEpisodeResolver;
pub use remote::{SshIdentity, SshRemote};
pub use tags::Id3TagStore;
pub use vcs::GitCli;
