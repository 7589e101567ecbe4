//! Internal users backend.
//!
//! Authenticates against bcrypt hashes kept in the internal users snapshot and
//! resolves backend roles and custom attributes from the same snapshot.
//!
//! - [`resolver`] - Record lookup by key, with a secondary username fallback
//! - [`secret`] - Secret decoding with guaranteed wiping
//! - [`verifier`] - bcrypt comparison and user construction

pub mod resolver;
pub mod secret;
pub mod verifier;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::AuthResult;
use crate::backend::{AuthenticationBackend, AuthorizationBackend, BackendType};
use crate::error::AuthError;
use crate::provider::{INTERNAL_USERS_STORE, SnapshotProvider};
use crate::types::{AuthCredentials, IdentityStore, User};

pub use secret::{PreparedSecret, SecretBytes};
pub use verifier::INTERNAL_ATTRIBUTE_PREFIX;

/// Backend over the internal users store.
///
/// Holds no state besides its provider; every call fetches the current
/// snapshot and releases it on return.
#[derive(Debug, Clone)]
pub struct InternalAuthenticationBackend<P> {
    provider: P,
}

impl<P: SnapshotProvider> InternalAuthenticationBackend<P> {
    /// Creates a backend reading snapshots from `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The snapshot provider this backend reads from.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn snapshot(&self) -> Option<Arc<IdentityStore>> {
        self.provider.current_snapshot(INTERNAL_USERS_STORE)
    }
}

impl<P: SnapshotProvider> AuthenticationBackend for InternalAuthenticationBackend<P> {
    fn backend_type(&self) -> BackendType {
        BackendType::Internal
    }

    fn authenticate(&self, credentials: &mut AuthCredentials) -> AuthResult<User> {
        let (identity_name, password, attributes) = credentials.parts_mut();
        let raw = SecretBytes::new(password);

        let Some(snapshot) = self.snapshot() else {
            warn!("Internal users store not loaded; rejecting authentication");
            return Err(AuthError::BackendUnavailable);
        };

        let Some((record_key, record)) = resolver::resolve(&snapshot, identity_name) else {
            debug!(user = identity_name, "Internal user not found");
            return Err(AuthError::identity_not_found(identity_name));
        };

        let secret = secret::prepare(raw)?;

        match verifier::verify_and_build(record_key, record, identity_name, secret, attributes) {
            Ok(user) => {
                info!(
                    user = identity_name,
                    record = record_key,
                    roles = user.roles.len(),
                    "Internal user authenticated"
                );
                Ok(user)
            }
            Err(e) => {
                debug!(user = identity_name, record = record_key, "Password does not match");
                Err(e)
            }
        }
    }

    fn exists(&self, user: &mut User) -> bool {
        let Some(snapshot) = self.snapshot() else {
            return false;
        };

        match resolver::resolve(&snapshot, &user.name) {
            Some((record_key, record)) => {
                debug!(user = %user.name, record = record_key, "Internal user exists");
                user.add_roles(&record.roles);
                true
            }
            None => false,
        }
    }
}

impl<P: SnapshotProvider> AuthorizationBackend for InternalAuthenticationBackend<P> {
    fn backend_type(&self) -> BackendType {
        BackendType::Internal
    }

    /// Merges roles of the record keyed by the credentials' identity name.
    ///
    /// Unlike [`authenticate`](AuthenticationBackend::authenticate) and
    /// [`exists`](AuthenticationBackend::exists), this does not fall back to
    /// the secondary username field: role filling runs after authentication,
    /// when the identity name is expected to be the canonical record key.
    fn fill_roles(&self, user: &mut User, credentials: &AuthCredentials) -> AuthResult<()> {
        let snapshot = self.snapshot().ok_or(AuthError::BackendUnavailable)?;

        let roles = resolver::resolve_by_key(&snapshot, credentials.username())
            .map(|record| record.roles.as_slice())
            .unwrap_or_default();

        if !roles.is_empty() {
            user.add_roles(roles);
        }
        Ok(())
    }
}
