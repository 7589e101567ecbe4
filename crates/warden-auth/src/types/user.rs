//! Authenticated identity.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// An identity after authentication, or one handed to the backend for
/// existence checks and role filling.
///
/// Roles form a set: adding the same role twice, or in a different order,
/// yields the same user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The identity name.
    pub name: String,

    /// Backend roles resolved for this identity.
    #[serde(default)]
    pub roles: BTreeSet<String>,

    /// Attributes carried over from the authenticated credentials,
    /// including `attr.internal.*` entries.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl User {
    /// Creates a user with no roles or attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Merges roles into the user's role set.
    pub fn add_roles<I, S>(&mut self, roles: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.roles
            .extend(roles.into_iter().map(|r| r.as_ref().to_owned()));
    }

    /// Returns `true` if the user has a specific role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Looks up an attribute by its full name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}
