//! podcast-publisher - podcast publishing workflow CLI
//!
//! Tags episode mp3 files, creates the post for the next episode,
//! deploys episodes over SSH and commits the site repository.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Episode numbering, tag values, post template, remote commands, config
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (HTTP page, ID3, SSH, git, editor)
//! - **CLI**: Command-line interface, logging setup and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
