//! Domain layer - Core business logic
//!
//! Contains value objects, pure rules, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod deploy;
pub mod episode;
pub mod error;
pub mod sync;
pub mod tags;

// Re-export common types
pub use config::AppConfig;
pub use deploy::{DeployRequest, HostKeyPolicy};
pub use episode::{EpisodePattern, EpisodePost};
pub use error::*;
pub use sync::SyncOutcome;
pub use tags::{CoverImage, EpisodeTags, TagRequest};
