//! Service settings.
//!
//! Loaded from an optional TOML file, then overridden by environment
//! variables of the form `WARDEN__SECTION__KEY` (e.g.
//! `WARDEN__INTERNAL_USERS__PATH=/etc/warden/users.toml`).
//!
//! ```toml
//! [logging]
//! level = "info"
//!
//! [internal_users]
//! path = "internal_users.toml"
//! watch = true
//! debounce_ms = 500
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, Result};

/// Default settings file looked up when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "warden.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WardenConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub internal_users: InternalUsersConfig,
}

impl WardenConfig {
    pub fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::validation("logging.level must not be empty"));
        }
        if self.internal_users.path.as_os_str().is_empty() {
            return Err(ConfigError::validation("internal_users.path must not be empty"));
        }
        if self.internal_users.watch && self.internal_users.debounce_ms == 0 {
            return Err(ConfigError::validation(
                "internal_users.debounce_ms must be > 0 when watch is enabled",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Where the internal users live and whether to follow file changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalUsersConfig {
    #[serde(default = "default_users_path")]
    pub path: PathBuf,
    /// Reload the users file when it changes on disk
    #[serde(default)]
    pub watch: bool,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_users_path() -> PathBuf {
    PathBuf::from("internal_users.toml")
}

fn default_debounce_ms() -> u64 {
    500
}

impl Default for InternalUsersConfig {
    fn default() -> Self {
        Self {
            path: default_users_path(),
            watch: false,
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl InternalUsersConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

pub mod loader {
    use super::{DEFAULT_CONFIG_FILE, WardenConfig};
    use crate::{ConfigError, Result};
    use config::{Config, Environment, File};
    use std::path::{Path, PathBuf};

    /// Loads settings from `path` (or `warden.toml`), applying environment
    /// overrides. A missing file is not an error; defaults apply.
    pub fn load_config(path: Option<&Path>) -> Result<WardenConfig> {
        let mut builder = Config::builder();
        let file = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        if file.exists() {
            builder = builder.add_source(File::from(file));
        }
        // Environment variable overrides, e.g., WARDEN__LOGGING__LEVEL=debug
        builder = builder.add_source(
            Environment::with_prefix("WARDEN")
                .try_parsing(true)
                .separator("__"),
        );
        let cfg = builder
            .build()
            .map_err(|e| ConfigError::parse(format!("config build error: {e}")))?;
        let merged: WardenConfig = cfg
            .try_deserialize()
            .map_err(|e| ConfigError::parse(format!("config deserialize error: {e}")))?;
        merged.validate()?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = WardenConfig::default();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.internal_users.path, PathBuf::from("internal_users.toml"));
        assert!(!cfg.internal_users.watch);
        assert_eq!(cfg.internal_users.debounce(), Duration::from_millis(500));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("warden.toml");
        std::fs::write(
            &path,
            r#"
[logging]
level = "debug"

[internal_users]
path = "/etc/warden/users.toml"
watch = true
debounce_ms = 250
"#,
        )
        .unwrap();

        let cfg = loader::load_config(Some(&path)).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.internal_users.path, PathBuf::from("/etc/warden/users.toml"));
        assert!(cfg.internal_users.watch);
        assert_eq!(cfg.internal_users.debounce_ms, 250);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = loader::load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(cfg.internal_users.debounce_ms, 500);
    }

    #[test]
    fn test_validate_rejects_zero_debounce_with_watch() {
        let mut cfg = WardenConfig::default();
        cfg.internal_users.watch = true;
        cfg.internal_users.debounce_ms = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));
    }
}
