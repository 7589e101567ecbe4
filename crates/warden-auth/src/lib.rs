//! # warden-auth
//!
//! Internal-users authentication and authorization backend for Warden.
//!
//! This crate provides:
//! - Identity resolution over an immutable internal-users snapshot
//! - bcrypt password verification with wiped secret buffers
//! - Role and custom attribute resolution for authenticated identities
//! - Capability traits used by the outer backend dispatcher
//!
//! ## Overview
//!
//! The snapshot of internal users is owned by an external provider (see
//! [`provider::SnapshotProvider`]). Every operation fetches the current
//! snapshot, works on it read-only and keeps no reference afterwards, so a
//! reload never races with an in-flight authentication.
//!
//! ## Modules
//!
//! - [`types`] - Identity records, snapshots, credentials and users
//! - [`provider`] - Snapshot provider trait and the in-memory snapshot store
//! - [`backend`] - Authentication/authorization capability traits
//! - [`internal`] - The internal-users backend implementation
//! - [`error`] - Error kinds returned by the backend

pub mod backend;
pub mod error;
pub mod internal;
pub mod provider;
pub mod types;

pub use backend::{AuthenticationBackend, AuthorizationBackend, BackendType};
pub use error::{AuthError, ErrorCategory};
pub use internal::InternalAuthenticationBackend;
pub use provider::{INTERNAL_USERS_STORE, SnapshotProvider, SnapshotStore};
pub use types::{AuthCredentials, IdentityRecord, IdentityStore, User};

/// Type alias for authentication/authorization results.
pub type AuthResult<T> = Result<T, AuthError>;

/// Prelude module for convenient imports.
///
/// ```ignore
/// use warden_auth::prelude::*;
/// ```
pub mod prelude {
    pub use crate::AuthResult;
    pub use crate::backend::{AuthenticationBackend, AuthorizationBackend, BackendType};
    pub use crate::error::{AuthError, ErrorCategory};
    pub use crate::internal::InternalAuthenticationBackend;
    pub use crate::provider::{INTERNAL_USERS_STORE, SnapshotProvider, SnapshotStore};
    pub use crate::types::{AuthCredentials, IdentityRecord, IdentityStore, User};
}
