//! Identity resolution over an internal users snapshot.

use tracing::debug;

use crate::types::{IdentityRecord, IdentityStore};

/// Finds the record that can authenticate `identity_name` by password.
///
/// A record whose key equals `identity_name` and that carries a hash wins.
/// Otherwise the snapshot is scanned in declared order for the first record
/// whose `username` equals `identity_name`; that record is returned only if
/// it carries a hash, and the scan does not continue past it.
///
/// The fallback is a linear scan, so the internal users store is meant to
/// hold hundreds of records, not millions.
pub fn resolve<'a>(
    snapshot: &'a IdentityStore,
    identity_name: &str,
) -> Option<(&'a str, &'a IdentityRecord)> {
    if let Some(direct) = snapshot
        .get_key_value(identity_name)
        .filter(|(_, r)| r.has_hash())
    {
        return Some(direct);
    }

    let (key, record) = snapshot
        .iter()
        .find(|(_, r)| r.username.as_deref() == Some(identity_name))?;

    if !record.has_hash() {
        debug!(record = key, "Secondary username match has no password hash");
        return None;
    }

    debug!(record = key, "Resolved identity by secondary username");
    Some((key, record))
}

/// Finds a record by key only, with or without a hash.
pub fn resolve_by_key<'a>(
    snapshot: &'a IdentityStore,
    identity_name: &str,
) -> Option<&'a IdentityRecord> {
    snapshot.get(identity_name)
}
