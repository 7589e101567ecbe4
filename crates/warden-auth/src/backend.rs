//! Backend capability traits.
//!
//! The outer access-control layer chains several backends and selects them by
//! [`BackendType`]. A backend can authenticate credentials, resolve roles for
//! an already authenticated identity, or both.

use std::fmt;

use crate::AuthResult;
use crate::types::{AuthCredentials, User};

/// Kinds of backends known to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BackendType {
    /// Users stored in the internal users snapshot.
    Internal,
    /// Directory lookups over LDAP.
    Ldap,
    /// Identities asserted by a verified JWT.
    Jwt,
    /// Accepts any identity without checks.
    Noop,
}

impl BackendType {
    /// Stable identifier used in dispatcher configuration.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::Ldap => "ldap",
            Self::Jwt => "jwt",
            Self::Noop => "noop",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend that verifies presented credentials.
pub trait AuthenticationBackend: Send + Sync {
    /// The identifier the dispatcher selects this backend by.
    fn backend_type(&self) -> BackendType;

    /// Verifies `credentials` and returns the authenticated user.
    ///
    /// The secret buffer inside `credentials` is wiped before this returns,
    /// whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error describing why the credentials were rejected.
    fn authenticate(&self, credentials: &mut AuthCredentials) -> AuthResult<User>;

    /// Returns `true` if `user` is known to this backend, merging its roles
    /// into `user` when it is.
    fn exists(&self, user: &mut User) -> bool;
}

/// A backend that resolves roles for an already authenticated identity.
pub trait AuthorizationBackend: Send + Sync {
    /// The identifier the dispatcher selects this backend by.
    fn backend_type(&self) -> BackendType;

    /// Merges the roles this backend knows for `credentials` into `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot answer.
    fn fill_roles(&self, user: &mut User, credentials: &AuthCredentials) -> AuthResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_type_identifier() {
        assert_eq!(BackendType::Internal.as_str(), "internal");
        assert_eq!(BackendType::Internal.to_string(), "internal");
        assert_eq!(BackendType::Ldap.to_string(), "ldap");
    }
}
