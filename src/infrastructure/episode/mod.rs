//! Episode number source adapters

mod page;

pub use page::{PageEpisodeResolver, PAGE_TIMEOUT};
