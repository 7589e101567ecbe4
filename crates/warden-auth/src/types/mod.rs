//! Common types used across the authentication and authorization modules.
//!
//! ## Domain Types
//!
//! - [`IdentityRecord`] - One stored internal user
//! - [`IdentityStore`] - Immutable point-in-time snapshot of internal users
//! - [`AuthCredentials`] - Caller-supplied identity name, secret and attributes
//! - [`User`] - Authenticated identity with resolved roles

pub mod credentials;
pub mod identity;
pub mod user;

pub use credentials::AuthCredentials;
pub use identity::{IdentityRecord, IdentityStore};
pub use user::User;
