//! Argon2id password hashing.
//!
//! Cost parameters are fixed. Callers only ever see the encoded PHC string,
//! which carries the algorithm, version, parameters and salt alongside the
//! derived hash.

use argon2::{
    password_hash::{
        rand_core::{OsRng, RngCore},
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use tracing::debug;

use crate::error::CryptoError;

/// Argon2id iteration count.
pub const TIME_COST: u32 = 3;

/// Argon2id memory cost in KiB (64 MiB).
pub const MEMORY_COST_KIB: u32 = 65_536;

/// Argon2id lanes.
pub const PARALLELISM: u32 = 2;

/// Length of the derived hash in bytes.
pub const HASH_LEN: usize = 32;

/// Length of the random salt in bytes.
pub const SALT_LEN: usize = 16;

/// Builds a hasher with the fixed parameters. Constructed per call.
fn hasher() -> Result<Argon2<'static>, CryptoError> {
    let params = Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, Some(HASH_LEN))
        .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes `secret` with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns [`CryptoError::PasswordHash`] if Argon2 rejects the input.
pub fn argon2_hash(secret: &str) -> Result<String, CryptoError> {
    let mut salt_bytes = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;

    let hash = hasher()?
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;

    debug!(
        m_cost = MEMORY_COST_KIB,
        t_cost = TIME_COST,
        p_cost = PARALLELISM,
        "Password hashed"
    );
    Ok(hash.to_string())
}

/// Verifies `secret` against an encoded Argon2id hash.
///
/// Malformed hashes and hashes produced by another Argon2 variant report
/// `false` rather than an error.
#[must_use]
pub fn argon2_verify(secret: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        debug!("Rejected malformed password hash");
        return false;
    };

    if !matches!(Algorithm::try_from(parsed.algorithm), Ok(Algorithm::Argon2id)) {
        debug!(algorithm = %parsed.algorithm, "Rejected non-Argon2id password hash");
        return false;
    }

    let Ok(argon2) = hasher() else {
        return false;
    };

    argon2.verify_password(secret.as_bytes(), &parsed).is_ok()
}
