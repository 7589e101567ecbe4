//! Configuration and identity store provisioning for Warden.
//!
//! This crate owns everything the authentication core treats as external:
//! - Service settings (`warden.toml` plus `WARDEN__*` environment overrides)
//! - Parsing of the internal users file into an [`IdentityStore`](warden_auth::IdentityStore)
//! - A file-backed [`SnapshotProvider`](warden_auth::SnapshotProvider) that
//!   reloads the internal users file when it changes

pub mod provider;
pub mod settings;
pub mod users_file;

pub use provider::{FileIdentityProvider, WatchHandle};
pub use settings::{InternalUsersConfig, LoggingConfig, WardenConfig};
pub use users_file::{load_users, parse_users};

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Watcher error: {0}")]
    Watcher(String),
}

impl ConfigError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn watcher(msg: impl Into<String>) -> Self {
        Self::Watcher(msg.into())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
