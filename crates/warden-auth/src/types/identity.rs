//! Internal users snapshot types.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identity Record
// =============================================================================

/// A single internal user as stored by the identity provider.
///
/// A record without a `hash` cannot authenticate by password but may still
/// contribute roles through [`fill_roles`](crate::AuthorizationBackend::fill_roles).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// bcrypt-encoded password hash (`$2a$`, `$2b$`, `$2x$` or `$2y$`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// Secondary login name, looked up when no record key matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Backend roles in declared order. May contain duplicates.
    #[serde(default)]
    pub roles: Vec<String>,

    /// Custom attributes exposed as `attr.internal.<name>` after authentication.
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl IdentityRecord {
    /// Creates a record that authenticates with the given bcrypt hash.
    #[must_use]
    pub fn with_hash(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
            ..Default::default()
        }
    }

    /// Sets the secondary login name.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Appends roles.
    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Adds a custom attribute.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns `true` if the record can authenticate by password.
    #[must_use]
    pub fn has_hash(&self) -> bool {
        self.hash.is_some()
    }
}

impl fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("hash", &self.hash.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("roles", &self.roles)
            .field("attributes", &self.attributes)
            .finish()
    }
}

// =============================================================================
// Identity Store
// =============================================================================

/// Immutable snapshot of internal users keyed by record key.
///
/// Iteration follows declared order, which makes the secondary username scan
/// deterministic. Snapshots are replaced wholesale on reload and never edited
/// in place once shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityStore {
    records: IndexMap<String, IdentityRecord>,
}

impl IdentityStore {
    /// Creates a snapshot from ordered records.
    #[must_use]
    pub fn new(records: IndexMap<String, IdentityRecord>) -> Self {
        Self { records }
    }

    /// Looks up a record by its key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IdentityRecord> {
        self.records.get(key)
    }

    /// Looks up a record by its key, returning the stored key alongside it.
    #[must_use]
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &IdentityRecord)> {
        self.records
            .get_key_value(key)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates records in declared order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IdentityRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of records in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the snapshot holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, IdentityRecord)> for IdentityStore {
    fn from_iter<T: IntoIterator<Item = (K, IdentityRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
