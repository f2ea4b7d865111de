//! Domain error types

use thiserror::Error;

/// Error while resolving an episode number
#[derive(Debug, Clone, Error)]
pub enum EpisodeError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid episode pattern \"{pattern}\": {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid file name: {0}")]
    InvalidFileName(String),

    #[error("invalid episode number {0:?}")]
    InvalidNumber(String),

    #[error("error getting episode page: {0}")]
    Request(String),

    #[error("invalid status code {0}")]
    Status(u16),

    #[error("episode reference not found in page")]
    NotFound,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid config value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
