//! Caller-supplied credentials.

use std::collections::BTreeMap;
use std::fmt;

use zeroize::Zeroize;

/// Credentials presented for one authentication request.
///
/// The secret buffer belongs to the caller but is lent mutably to the backend
/// for the duration of a call, which wipes it before returning. Whatever is
/// left is zeroized again when the credentials are dropped.
///
/// The attribute map collects request-scoped attributes. The internal backend
/// appends `attr.internal.*` entries to it on successful authentication.
pub struct AuthCredentials {
    username: String,
    password: Vec<u8>,
    attributes: BTreeMap<String, String>,
}

impl AuthCredentials {
    /// Creates credentials for `username` carrying the raw secret bytes.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<Vec<u8>>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// The identity name presented by the caller.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The raw secret bytes. All zero after the backend has seen them.
    #[must_use]
    pub fn password(&self) -> &[u8] {
        &self.password
    }

    /// Adds a request-scoped attribute, replacing any previous value.
    pub fn add_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// All attributes attached to these credentials.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Splits the credentials into independently borrowable parts.
    pub(crate) fn parts_mut(&mut self) -> (&str, &mut [u8], &mut BTreeMap<String, String>) {
        (
            &self.username,
            self.password.as_mut_slice(),
            &mut self.attributes,
        )
    }
}

impl Drop for AuthCredentials {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("attributes", &self.attributes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = AuthCredentials::new("alice", "hunter2");
        let debug = format!("{creds:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_add_attribute_overwrites() {
        let mut creds = AuthCredentials::new("alice", "x");
        creds.add_attribute("origin", "rest");
        creds.add_attribute("origin", "transport");
        assert_eq!(creds.attributes().get("origin").map(String::as_str), Some("transport"));
        assert_eq!(creds.attributes().len(), 1);
    }
}
