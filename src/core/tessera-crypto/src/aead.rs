//! AES-256-GCM authenticated encryption.
//!
//! Sealed format: `nonce (12 bytes) || ciphertext || tag (16 bytes)`.
//!
//! Nonces are generated here on every call and there is no API to supply
//! one, so a (key, nonce) pair is never reused.

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::error::CryptoError;
use crate::keys::DerivedKey;

/// Size of a GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;

/// Size of a GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Smallest well-formed sealed message: a nonce and a tag around an empty
/// ciphertext.
pub const MIN_SEALED_LEN: usize = NONCE_SIZE + TAG_SIZE;

fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

fn cipher(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypts `plaintext` under `key` with a fresh random nonce.
///
/// `associated_data` is authenticated but not encrypted.
pub fn seal(
    key: &DerivedKey,
    plaintext: &[u8],
    associated_data: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let nonce_bytes = generate_nonce();
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher(key)
        .encrypt(
            nonce,
            Payload {
                msg: plaintext,
                aad: associated_data,
            },
        )
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&ciphertext);

    Ok(result)
}

/// Decrypts a message produced by [`seal`].
///
/// Every failure, structural or cryptographic, is the same
/// [`CryptoError::DecryptionFailed`].
pub fn open(
    key: &DerivedKey,
    sealed: &[u8],
    associated_data: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if sealed.len() < MIN_SEALED_LEN {
        return Err(CryptoError::DecryptionFailed);
    }

    let (nonce, encrypted) = sealed.split_at(NONCE_SIZE);

    let plaintext = cipher(key)
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: encrypted,
                aad: associated_data,
            },
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::keys::KEY_SIZE;

    fn key(fill: u8) -> DerivedKey {
        DerivedKey::from_bytes(&[fill; KEY_SIZE]).unwrap()
    }

    #[test]
    fn test_seal_open_roundtrip() {
        let key = key(1);
        let sealed = seal(&key, b"Hello, Tessera!", b"").unwrap();
        let opened = open(&key, &sealed, b"").unwrap();

        assert_eq!(&*opened, b"Hello, Tessera!");
    }

    #[test]
    fn test_seal_open_with_aad() {
        let key = key(2);
        let sealed = seal(&key, b"secret data", b"tenant-a").unwrap();

        assert_eq!(&*open(&key, &sealed, b"tenant-a").unwrap(), b"secret data");
        assert!(matches!(
            open(&key, &sealed, b"tenant-b"),
            Err(CryptoError::DecryptionFailed)
        ));
    }

    #[test]
    fn test_open_wrong_key_fails() {
        let sealed = seal(&key(3), b"secret data", b"").unwrap();
        assert!(open(&key(4), &sealed, b"").is_err());
    }

    #[test]
    fn test_sealed_format() {
        let sealed = seal(&key(5), b"test", b"").unwrap();
        assert_eq!(sealed.len(), NONCE_SIZE + 4 + TAG_SIZE);
    }

    #[test]
    fn test_empty_plaintext() {
        let key = key(6);
        let sealed = seal(&key, b"", b"").unwrap();
        assert_eq!(sealed.len(), MIN_SEALED_LEN);
        assert!(open(&key, &sealed, b"").unwrap().is_empty());
    }

    #[test]
    fn test_nonces_differ() {
        let key = key(7);
        let a = seal(&key, b"same", b"").unwrap();
        let b = seal(&key, b"same", b"").unwrap();
        assert_ne!(a[..NONCE_SIZE], b[..NONCE_SIZE]);
        assert_ne!(a, b);
    }

    #[test]
    fn test_too_short_fails() {
        let result = open(&key(8), &[0u8; MIN_SEALED_LEN - 1], b"");
        assert!(matches!(result, Err(CryptoError::DecryptionFailed)));
    }

    #[test]
    fn test_tampered_ciphertext_fails() {
        let key = key(9);
        let mut sealed = seal(&key, b"secret data", b"").unwrap();
        sealed[NONCE_SIZE] ^= 0xFF;

        assert!(matches!(
            open(&key, &sealed, b""),
            Err(CryptoError::DecryptionFailed)
        ));
    }
}
