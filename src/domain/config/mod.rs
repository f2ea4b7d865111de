//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DeployConfig, GitConfig, Mp3Config, PrepConfig, PrepSettings, DEFAULT_PAGE_URL,
};
