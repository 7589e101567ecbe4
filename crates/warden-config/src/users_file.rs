//! Internal users file.
//!
//! Each top-level table is one record, keyed by its record key. Declared order
//! is kept and drives the secondary username lookup.
//!
//! ```toml
//! [admin]
//! hash = "$2y$12$..."
//! roles = ["admin"]
//!
//! [u1]
//! username = "alice"
//! hash = "$2y$12$..."
//! roles = ["reader", "writer"]
//!
//! [u1.attributes]
//! department = "ops"
//! ```

use std::path::Path;

use tracing::{debug, warn};
use warden_auth::IdentityStore;

use crate::{ConfigError, Result};

/// Reads and parses the internal users file at `path`.
pub fn load_users(path: &Path) -> Result<IdentityStore> {
    let content = std::fs::read_to_string(path)?;
    let store = parse_users(&content)
        .map_err(|e| match e {
            ConfigError::Parse(msg) => ConfigError::parse(format!("{}: {msg}", path.display())),
            other => other,
        })?;
    debug!(path = %path.display(), records = store.len(), "Loaded internal users file");
    Ok(store)
}

/// Parses an internal users document.
///
/// Rejects empty record keys and records whose hash is present but empty.
/// Records without a hash are kept (they still carry roles) but cannot
/// authenticate by password.
pub fn parse_users(content: &str) -> Result<IdentityStore> {
    let store: IdentityStore = toml::from_str(content).map_err(|e| ConfigError::parse(e.to_string()))?;

    for (key, record) in store.iter() {
        if key.trim().is_empty() {
            return Err(ConfigError::validation("record keys must not be empty"));
        }
        match record.hash.as_deref() {
            Some(hash) if hash.trim().is_empty() => {
                return Err(ConfigError::validation(format!(
                    "record '{key}' has an empty hash"
                )));
            }
            Some(hash) if !hash.starts_with("$2") => {
                warn!(record = key, "Hash does not look like bcrypt; logins for this record will fail");
            }
            Some(_) => {}
            None => {
                warn!(record = key, "Record has no hash and cannot authenticate by password");
            }
        }
    }

    Ok(store)
}
