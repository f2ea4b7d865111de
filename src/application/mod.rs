//! Application layer - Use cases and port interfaces
//!
//! One use case per subcommand, each talking to the outside world
//! only through the traits in `ports`.

pub mod deploy;
pub mod ports;
pub mod prepare_episode;
pub mod sync_repo;
pub mod tag_episode;

// Re-export use cases
pub use deploy::{DeployError, DeployUseCase};
pub use prepare_episode::{
    PostError, PrepareEpisodeInput, PrepareEpisodeOutput, PrepareEpisodeUseCase,
};
pub use sync_repo::{SyncError, SyncRepositoryUseCase};
pub use tag_episode::{TagEpisodeOutput, TagEpisodeUseCase, TagError};
