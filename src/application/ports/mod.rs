//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod editor;
pub mod episode_source;
pub mod remote_shell;
pub mod tag_store;
pub mod version_control;

// Re-export common types
pub use config::ConfigStore;
pub use editor::{EditorError, EditorLauncher};
pub use episode_source::NextEpisodeSource;
pub use remote_shell::{RemoteError, RemoteShell};
pub use tag_store::{TagStore, TagStoreError};
pub use version_control::{VcsError, VersionControl};
