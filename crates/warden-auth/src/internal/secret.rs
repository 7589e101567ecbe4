//! Secret handling with guaranteed wiping.
//!
//! Every buffer that ever holds the caller's secret is owned by a guard that
//! zeroizes it on drop: the borrowed raw bytes ([`SecretBytes`]) and the
//! decoded text handed to the hash routine ([`PreparedSecret`]). Drop runs on
//! normal return, on `?` early returns and during unwinding.

use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, Zeroizing};

use crate::AuthResult;
use crate::error::AuthError;

/// Borrowed raw secret bytes, wiped in place when the guard is dropped.
///
/// The buffer keeps its length; only its contents are set to zero.
pub struct SecretBytes<'a> {
    buf: &'a mut [u8],
}

impl<'a> SecretBytes<'a> {
    /// Takes responsibility for wiping `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf }
    }
}

impl Deref for SecretBytes<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.buf
    }
}

impl Drop for SecretBytes<'_> {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}

impl fmt::Debug for SecretBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretBytes([REDACTED; {}])", self.buf.len())
    }
}

/// Decoded secret ready for hash comparison. Zeroized on drop.
pub struct PreparedSecret {
    text: Zeroizing<String>,
}

impl PreparedSecret {
    /// The UTF-8 bytes passed to the hash routine.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

impl fmt::Debug for PreparedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PreparedSecret([REDACTED])")
    }
}

/// Converts the raw secret into its comparison form.
///
/// Consumes the raw guard, so the caller's buffer is wiped when this returns,
/// whether it returns the prepared secret or [`AuthError::EmptySecret`].
///
/// Malformed UTF-8 is not rejected: each invalid sequence becomes U+FFFD,
/// exactly as lossy UTF-8 decoding does.
pub fn prepare(raw: SecretBytes<'_>) -> AuthResult<PreparedSecret> {
    if raw.is_empty() {
        return Err(AuthError::EmptySecret);
    }

    Ok(PreparedSecret {
        text: decode_lossy(&raw),
    })
}

/// Lossy UTF-8 decode into a buffer sized up front.
///
/// Growing a `String` while pushing would leave partial copies of the secret
/// in released allocations, so the exact decoded length is computed first.
fn decode_lossy(raw: &[u8]) -> Zeroizing<String> {
    let replacement_len = char::REPLACEMENT_CHARACTER.len_utf8();
    let capacity = raw
        .utf8_chunks()
        .map(|chunk| {
            let invalid = if chunk.invalid().is_empty() { 0 } else { replacement_len };
            chunk.valid().len() + invalid
        })
        .sum();

    let mut text = Zeroizing::new(String::with_capacity(capacity));
    for chunk in raw.utf8_chunks() {
        text.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            text.push(char::REPLACEMENT_CHARACTER);
        }
    }
    text
}
