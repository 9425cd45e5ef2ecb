//! Cryptographic error types.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
///
/// Verification failures are not errors: every `verify` function in this
/// crate answers with a plain `bool`.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A precondition on the inputs was violated (zero length, empty
    /// alphabet, empty prefix). Raised before any randomness is drawn.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed. Deliberately carries no detail about which check
    /// rejected the envelope.
    #[error("decryption failed")]
    DecryptionFailed,

    /// Argon2id hashing failed.
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl CryptoError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
