//! Tag container adapters

mod id3;

pub use self::id3::Id3TagStore;
