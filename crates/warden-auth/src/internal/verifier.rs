//! Password verification and claims building.

use std::collections::BTreeMap;

use tracing::warn;

use crate::AuthResult;
use crate::error::AuthError;
use crate::internal::secret::PreparedSecret;
use crate::types::{IdentityRecord, User};

/// Prefix of attributes sourced from the internal users store.
///
/// Policies may trust `attr.internal.*` differently from caller-supplied
/// attributes, so the prefix is part of the contract.
pub const INTERNAL_ATTRIBUTE_PREFIX: &str = "attr.internal.";

/// Verifies `secret` against the record's bcrypt hash and, on success, builds
/// the authenticated user.
///
/// On success every custom attribute of the record is copied into
/// `attributes` under [`INTERNAL_ATTRIBUTE_PREFIX`], and the returned user
/// carries the record's roles as a set plus a copy of the annotated
/// attributes. `secret` is consumed and wiped before this returns.
pub fn verify_and_build(
    record_key: &str,
    record: &IdentityRecord,
    identity_name: &str,
    secret: PreparedSecret,
    attributes: &mut BTreeMap<String, String>,
) -> AuthResult<User> {
    if !password_matches(record_key, record, secret) {
        return Err(AuthError::password_mismatch(identity_name));
    }

    for (name, value) in &record.attributes {
        attributes.insert(format!("{INTERNAL_ATTRIBUTE_PREFIX}{name}"), value.clone());
    }

    let mut user = User::new(identity_name);
    user.add_roles(&record.roles);
    user.attributes = attributes.clone();
    Ok(user)
}

fn password_matches(record_key: &str, record: &IdentityRecord, secret: PreparedSecret) -> bool {
    let Some(hash) = record.hash.as_deref() else {
        return false;
    };

    match bcrypt::verify(secret.as_bytes(), hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!(record = record_key, error = %e, "Stored password hash is not a valid bcrypt hash");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::secret::{SecretBytes, prepare};

    fn prepared(secret: &str) -> PreparedSecret {
        let mut buf = secret.as_bytes().to_vec();
        prepare(SecretBytes::new(&mut buf)).unwrap()
    }

    fn record() -> IdentityRecord {
        IdentityRecord::with_hash(bcrypt::hash("correct-horse", 4).unwrap())
            .roles(["reader", "writer", "reader"])
            .attribute("department", "ops")
            .attribute("level", "3")
    }

    #[test]
    fn test_match_builds_user() {
        let mut attributes = BTreeMap::new();
        attributes.insert("origin".to_string(), "rest".to_string());

        let user = verify_and_build(
            "alice",
            &record(),
            "alice",
            prepared("correct-horse"),
            &mut attributes,
        )
        .unwrap();

        assert_eq!(user.name, "alice");
        assert_eq!(user.roles.len(), 2);
        assert!(user.has_role("reader"));
        assert!(user.has_role("writer"));
        assert_eq!(user.attribute("attr.internal.department"), Some("ops"));
        assert_eq!(user.attribute("attr.internal.level"), Some("3"));
        assert_eq!(user.attribute("origin"), Some("rest"));
        assert_eq!(
            attributes.get("attr.internal.department").map(String::as_str),
            Some("ops")
        );
        assert!(!attributes.contains_key("department"));
    }

    #[test]
    fn test_mismatch_leaves_attributes_untouched() {
        let mut attributes = BTreeMap::new();
        let err = verify_and_build("alice", &record(), "alice", prepared("wrong"), &mut attributes)
            .unwrap_err();

        assert_eq!(err, AuthError::password_mismatch("alice"));
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_malformed_hash_is_a_mismatch() {
        let record = IdentityRecord::with_hash("not-a-bcrypt-hash");
        let mut attributes = BTreeMap::new();
        let err = verify_and_build("alice", &record, "alice", prepared("x"), &mut attributes)
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch { .. }));
    }

    #[test]
    fn test_missing_hash_is_a_mismatch() {
        let record = IdentityRecord::default();
        let mut attributes = BTreeMap::new();
        let err = verify_and_build("alice", &record, "alice", prepared("x"), &mut attributes)
            .unwrap_err();
        assert!(matches!(err, AuthError::PasswordMismatch { .. }));
    }

    #[test]
    fn test_accepts_2a_and_2b_prefixes() {
        let hash = bcrypt::hash_with_result("s3cret", 4).unwrap();
        for version in [bcrypt::Version::TwoA, bcrypt::Version::TwoB] {
            let record = IdentityRecord::with_hash(hash.format_for_version(version));
            let mut attributes = BTreeMap::new();
            assert!(
                verify_and_build("k", &record, "k", prepared("s3cret"), &mut attributes).is_ok()
            );
        }
    }
}
