//! User-facing secrets: backup codes, one-time passcodes, generated
//! passwords and data encryption keys.

use tessera_crypto::{argon2_hash, argon2_verify, entropy};
use tracing::debug;

use crate::artifact::{HashedToken, PasswordCredential};
use crate::catalog::{prefix, EntropyClass};
use crate::error::TokenError;
use crate::tokens::mint;

/// Codes issued by [`backup_codes`] when the caller has no preference.
pub const DEFAULT_BACKUP_CODES: usize = 10;

/// Random bytes per backup code (16 hex characters).
pub const BACKUP_CODE_BYTES: usize = 8;

/// Digits in a one-time passcode.
pub const OTP_DIGITS: usize = 6;

/// Characters in a generated password.
pub const PASSWORD_LENGTH: usize = 16;

/// ASCII letters, digits and punctuation.
pub const PASSWORD_ALPHABET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##,
);

/// Issues `count` single-use recovery codes, each 16 hex characters with
/// no prefix.
///
/// # Errors
///
/// Returns [`TokenError::InvalidArgument`] if `count` is zero.
pub fn backup_codes(count: usize) -> Result<Vec<HashedToken>, TokenError> {
    if count == 0 {
        return Err(TokenError::InvalidArgument(
            "count must be > 0".to_string(),
        ));
    }

    let codes = (0..count)
        .map(|_| Ok(HashedToken::new(entropy::hex(BACKUP_CODE_BYTES)?)))
        .collect::<Result<Vec<_>, TokenError>>()?;

    debug!(count, "Backup codes issued");
    Ok(codes)
}

/// Mints a data encryption key (`ek_`) along with its digest.
pub fn encryption_key() -> Result<HashedToken, TokenError> {
    let plaintext = mint(prefix::ENCRYPTION_KEY, EntropyClass::Secret)?;
    Ok(HashedToken::new(plaintext))
}

/// A six-digit numeric one-time passcode with its digest.
pub fn otp() -> Result<HashedToken, TokenError> {
    let digits = entropy::random_string(OTP_DIGITS, "0123456789")?;
    Ok(HashedToken::new(digits))
}

/// Generates a 16-character password and hashes it with Argon2id.
pub fn password() -> Result<PasswordCredential, TokenError> {
    let plaintext = entropy::random_string(PASSWORD_LENGTH, PASSWORD_ALPHABET)?;
    let hash = argon2_hash(&plaintext)?;
    Ok(PasswordCredential::new(plaintext, hash))
}

/// Checks a password against its stored Argon2id hash.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    argon2_verify(password, hash)
}
