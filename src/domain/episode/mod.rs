//! Episode domain module

mod number;
mod post;

pub use number::{episode_from_file, scan_episode_page, EpisodePattern, DEFAULT_EPISODE_PATTERN};
pub use post::{EpisodePost, POST_DATE_FORMAT};
