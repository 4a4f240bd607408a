//! Application configuration

mod app_config;

pub use app_config::{
    AppConfig, AuthConfig, ListingConfig, LogFormat, LoggingConfig, ServerConfig, StorageBackend,
    StorageSettings,
};
