//! HMAC-SHA256 signing.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use crate::compare::timing_safe_equals;
use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Signs `message` with `secret`, returning the lowercase hex MAC.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if the MAC cannot be keyed with
/// `secret`.
pub fn hmac_sign(
    message: impl AsRef<[u8]>,
    secret: impl AsRef<[u8]>,
) -> Result<String, CryptoError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_ref())
        .map_err(|e| CryptoError::invalid(format!("unusable HMAC key: {e}")))?;
    mac.update(message.as_ref());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Verifies a hex signature produced by [`hmac_sign`].
///
/// Never fails: any error while recomputing the MAC is reported as `false`.
/// The supplied signature is compared case-insensitively in constant time.
#[must_use]
pub fn hmac_verify(
    message: impl AsRef<[u8]>,
    secret: impl AsRef<[u8]>,
    signature: &str,
) -> bool {
    match hmac_sign(message, secret) {
        Ok(computed) => timing_safe_equals(computed, signature.to_ascii_lowercase()),
        Err(e) => {
            debug!(error = %e, "HMAC verification could not recompute signature");
            false
        },
    }
}
