//! HKDF-SHA256 key derivation (RFC 5869).
//!
//! The envelope key is re-derived from the caller's master secret on every
//! operation. Nothing is cached.

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::keys::{DerivedKey, KEY_SIZE};

/// HKDF info label binding derived keys to the AES-GCM envelope.
pub const ENVELOPE_INFO: &[u8] = b"tessera-aes-gcm-key";

/// Expands `ikm` into `length` bytes of output key material.
///
/// A `None` salt is HKDF's default all-zero salt.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if `length` is zero or exceeds
/// `255 * 32`.
pub fn hkdf_sha256(
    ikm: &[u8],
    salt: Option<&[u8]>,
    info: &[u8],
    length: usize,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if length == 0 {
        return Err(CryptoError::invalid("output length must be > 0"));
    }

    if length > 255 * 32 {
        return Err(CryptoError::invalid(
            "output length too large for HKDF-SHA256",
        ));
    }

    let hkdf = Hkdf::<Sha256>::new(salt, ikm);

    let mut okm = Zeroizing::new(vec![0u8; length]);
    hkdf.expand(info, &mut okm)
        .map_err(|_| CryptoError::invalid("HKDF expansion failed"))?;

    Ok(okm)
}

/// Derives the 32-byte envelope key from `secret`.
///
/// Same secret and salt always give the same key. Domain separation comes
/// from [`ENVELOPE_INFO`].
pub fn derive_key(
    secret: impl AsRef<[u8]>,
    salt: Option<&[u8]>,
) -> Result<DerivedKey, CryptoError> {
    let okm = hkdf_sha256(secret.as_ref(), salt, ENVELOPE_INFO, KEY_SIZE)?;
    DerivedKey::from_bytes(&okm)
}
