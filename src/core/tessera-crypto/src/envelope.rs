//! Transportable encrypted envelopes.
//!
//! An envelope is `base64(nonce || ciphertext || tag)`, sealed with a key
//! derived from the caller's master secret by [`derive_key`]. An optional
//! context string is bound as associated data: an envelope only opens under
//! the context it was sealed with.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;
use zeroize::Zeroizing;

use crate::aead::{open, seal};
use crate::error::CryptoError;
use crate::kdf::derive_key;

fn associated_data(context: Option<&str>) -> &[u8] {
    context.map(str::as_bytes).unwrap_or_default()
}

/// Encrypts `plaintext` into a base64 envelope.
///
/// Each call draws a fresh nonce, so encrypting the same input twice gives
/// two different envelopes.
///
/// # Errors
///
/// Returns [`CryptoError::EncryptionFailed`] only if the plaintext exceeds
/// the GCM message length limit.
pub fn aes_encrypt(
    plaintext: impl AsRef<[u8]>,
    secret_key: impl AsRef<[u8]>,
    context: Option<&str>,
) -> Result<String, CryptoError> {
    let plaintext = plaintext.as_ref();
    let key = derive_key(secret_key, None)?;
    let sealed = seal(&key, plaintext, associated_data(context))?;

    debug!(
        plaintext_len = plaintext.len(),
        bound = context.is_some_and(|c| !c.is_empty()),
        "Envelope sealed"
    );
    Ok(BASE64.encode(sealed))
}

/// Decrypts an envelope to raw bytes.
///
/// # Errors
///
/// Returns [`CryptoError::DecryptionFailed`] for bad base64, a blob shorter
/// than nonce plus tag, a wrong key, a wrong context or any tampering. The
/// error never says which.
pub fn aes_decrypt_bytes(
    blob: &str,
    secret_key: impl AsRef<[u8]>,
    context: Option<&str>,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let sealed = BASE64
        .decode(blob.trim())
        .map_err(|_| CryptoError::DecryptionFailed)?;
    let key = derive_key(secret_key, None).map_err(|_| CryptoError::DecryptionFailed)?;

    open(&key, &sealed, associated_data(context)).inspect_err(|_| {
        debug!(blob_len = sealed.len(), "Envelope rejected");
    })
}

/// Decrypts an envelope whose plaintext is UTF-8 text.
///
/// # Errors
///
/// As [`aes_decrypt_bytes`]; a plaintext that is not valid UTF-8 is also a
/// [`CryptoError::DecryptionFailed`].
pub fn aes_decrypt(
    blob: &str,
    secret_key: impl AsRef<[u8]>,
    context: Option<&str>,
) -> Result<String, CryptoError> {
    let bytes = aes_decrypt_bytes(blob, secret_key, context)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| CryptoError::DecryptionFailed)
}
