//! # Tessera Crypto
//!
//! Cryptographic primitives behind every Tessera token.
//!
//! This crate provides:
//! - Secure entropy (raw bytes, hex, URL-safe base64, alphabet sampling)
//! - Constant-time comparison
//! - Prefixed identifier formatting
//! - SHA-256 digests and HMAC-SHA256 signatures
//! - Argon2id password hashing
//! - AES-256-GCM envelopes keyed through HKDF-SHA256
//!
//! Every operation is a pure function of its arguments. No hashers, keys or
//! parameters are held in process-wide state, so all of it is safe to call
//! from any number of threads.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod aead;
pub mod compare;
pub mod digest;
pub mod entropy;
pub mod envelope;
pub mod error;
pub mod ident;
pub mod kdf;
pub mod keys;
pub mod mac;
pub mod password;

pub use compare::timing_safe_equals;
pub use digest::{sha256_hash, sha256_verify};
pub use envelope::{aes_decrypt, aes_decrypt_bytes, aes_encrypt};
pub use error::CryptoError;
pub use ident::{with_prefix, SEPARATOR};
pub use kdf::derive_key;
pub use keys::DerivedKey;
pub use mac::{hmac_sign, hmac_verify};
pub use password::{argon2_hash, argon2_verify};
