//! SHA-256 digests for storable token fingerprints.

use sha2::{Digest, Sha256};

use crate::compare::timing_safe_equals;

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Computes the lowercase hex SHA-256 digest of `data`.
///
/// Text is hashed as its UTF-8 bytes.
pub fn sha256_hash(data: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(data.as_ref()))
}

/// Checks `data` against a hex digest.
///
/// `expected_hex` is lowercased before a constant-time comparison. A digest
/// of the wrong length or with non-hex characters is simply a mismatch.
#[must_use]
pub fn sha256_verify(data: impl AsRef<[u8]>, expected_hex: &str) -> bool {
    let computed = sha256_hash(data);
    timing_safe_equals(computed, expected_hex.to_ascii_lowercase())
}
