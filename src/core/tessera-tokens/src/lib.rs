//! # Tessera Tokens
//!
//! Generators for every credential Tessera issues, built on
//! [`tessera_crypto`].
//!
//! This crate provides:
//! - Authentication tokens (session, refresh, CSRF, magic link, ...)
//! - Signed API keys and recoverable webhook secrets
//! - HS256 JWTs with enforced `iat`/`exp`
//! - Operational keys (idempotency, deduplication, trace, time, ...)
//! - Backup codes, one-time passcodes, passwords and encryption keys
//!
//! Every generator returns the plaintext together with whatever the server
//! should store in its place. Plaintexts are zeroized on drop and never
//! appear in `Debug` output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod artifact;
pub mod catalog;
pub mod error;
pub mod jwt;
pub mod keys;
pub mod secrets;
pub mod tokens;

pub use artifact::{EncryptedSecret, HashedToken, PasswordCredential, SignedToken};
pub use catalog::EntropyClass;
pub use error::TokenError;
pub use jwt::{decode_jwt, encode_jwt, Claims, DEFAULT_JWT_EXPIRY_SECS};
pub use keys::{classification_key, fingerprint_key, generate_key, time_key, trace_key, KeyKind};
pub use secrets::{
    backup_codes, encryption_key, otp, password, verify_password, DEFAULT_BACKUP_CODES,
};
pub use tokens::{
    api_key, generate_token, reveal_webhook_secret, verify_api_key, webhook_secret, TokenKind,
};
