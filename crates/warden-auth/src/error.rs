//! Authentication and authorization error types.
//!
//! None of these errors ever carries secret material. Identity names are
//! embedded for diagnostics only; callers that must not reveal which check
//! failed should surface [`AuthError::public_message`] instead of the
//! `Display` output.

use std::fmt;

/// Message returned when the internal users store has not been loaded.
pub const BACKEND_UNAVAILABLE_MESSAGE: &str = "Internal authentication backend not configured. \
    The internal users store is not initialized yet; check the [internal_users] section of \
    warden.toml and make sure the users file exists and parses (`warden validate`).";

/// Errors that can occur during authentication and authorization operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The internal users snapshot is absent (configuration not loaded).
    #[error("{}", BACKEND_UNAVAILABLE_MESSAGE)]
    BackendUnavailable,

    /// No record matches by key or by secondary username field.
    #[error("{name} not found")]
    IdentityNotFound {
        /// The identity name that was looked up.
        name: String,
    },

    /// The caller supplied a zero-length secret.
    #[error("Empty passwords are not supported")]
    EmptySecret,

    /// The supplied secret does not match the stored hash.
    #[error("Password does not match for {name}")]
    PasswordMismatch {
        /// The identity name that failed verification.
        name: String,
    },
}

impl AuthError {
    /// Creates a new `IdentityNotFound` error.
    #[must_use]
    pub fn identity_not_found(name: impl Into<String>) -> Self {
        Self::IdentityNotFound { name: name.into() }
    }

    /// Creates a new `PasswordMismatch` error.
    #[must_use]
    pub fn password_mismatch(name: impl Into<String>) -> Self {
        Self::PasswordMismatch { name: name.into() }
    }

    /// Returns `true` if the failure was caused by the presented credentials
    /// rather than by the backend state.
    #[must_use]
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            Self::IdentityNotFound { .. } | Self::EmptySecret | Self::PasswordMismatch { .. }
        )
    }

    /// Returns the error category for logging and dispatch decisions.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::BackendUnavailable => ErrorCategory::Configuration,
            Self::IdentityNotFound { .. } | Self::EmptySecret | Self::PasswordMismatch { .. } => {
                ErrorCategory::Authentication
            }
        }
    }

    /// Message safe to show to the party that presented the credentials.
    ///
    /// Credential failures collapse into one message so the response does not
    /// tell a guesser whether the identity exists.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Authentication => "Invalid credentials",
            ErrorCategory::Configuration => "Authentication backend unavailable",
        }
    }
}

/// Categories of authentication errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The backend is not ready to answer.
    Configuration,
    /// The presented credentials were rejected.
    Authentication,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::Authentication => write!(f, "authentication"),
        }
    }
}
