//! Minted artifacts.
//!
//! Each artifact pairs the plaintext (shown to the user once) with the
//! derivative the server keeps: a digest, a signature, an encrypted blob or
//! a password hash. Plaintexts are wiped on drop and redacted from `Debug`.

use serde::Serialize;
use tessera_crypto::{sha256_hash, sha256_verify};
use zeroize::{Zeroize, ZeroizeOnDrop};

const REDACTED: &str = "[REDACTED]";

/// A plaintext token with its SHA-256 digest.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct HashedToken {
    plaintext: String,
    hash: String,
}

impl HashedToken {
    pub(crate) fn new(plaintext: String) -> Self {
        let hash = sha256_hash(&plaintext);
        Self { plaintext, hash }
    }

    /// The token to hand out.
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Lowercase hex SHA-256 of the plaintext, for storage.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Checks a presented candidate against this token's digest.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        sha256_verify(candidate, &self.hash)
    }
}

impl std::fmt::Debug for HashedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashedToken")
            .field("plaintext", &REDACTED)
            .field("hash", &self.hash)
            .finish()
    }
}

/// A plaintext token with its HMAC-SHA256 signature.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct SignedToken {
    plaintext: String,
    signature: String,
}

impl SignedToken {
    pub(crate) fn new(plaintext: String, signature: String) -> Self {
        Self {
            plaintext,
            signature,
        }
    }

    /// The token to hand out.
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Lowercase hex HMAC-SHA256 of the plaintext.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl std::fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedToken")
            .field("plaintext", &REDACTED)
            .field("signature", &self.signature)
            .finish()
    }
}

/// A plaintext secret with its AES-256-GCM envelope.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct EncryptedSecret {
    plaintext: String,
    encrypted: String,
}

impl EncryptedSecret {
    pub(crate) fn new(plaintext: String, encrypted: String) -> Self {
        Self {
            plaintext,
            encrypted,
        }
    }

    /// The secret to hand out.
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Base64 envelope to store.
    pub fn encrypted(&self) -> &str {
        &self.encrypted
    }
}

impl std::fmt::Debug for EncryptedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedSecret")
            .field("plaintext", &REDACTED)
            .field("encrypted", &self.encrypted)
            .finish()
    }
}

/// A generated password with its Argon2id hash.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct PasswordCredential {
    plaintext: String,
    hash: String,
}

impl PasswordCredential {
    pub(crate) fn new(plaintext: String, hash: String) -> Self {
        Self { plaintext, hash }
    }

    /// The password to hand out.
    pub fn plaintext(&self) -> &str {
        &self.plaintext
    }

    /// Encoded Argon2id hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }
}

impl std::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredential")
            .field("plaintext", &REDACTED)
            .field("hash", &self.hash)
            .finish()
    }
}
