//! Authentication tokens.
//!
//! Most tokens are `prefix_` plus URL-safe entropy, stored by SHA-256 digest.
//! API keys are signed instead of hashed, and webhook secrets are encrypted
//! because they must be recoverable for outbound signing.

use std::fmt;
use std::str::FromStr;

use tessera_crypto::{aes_decrypt, aes_encrypt, entropy, hmac_sign, hmac_verify, with_prefix};
use tracing::debug;

use crate::artifact::{EncryptedSecret, HashedToken, SignedToken};
use crate::catalog::{prefix, EntropyClass};
use crate::error::TokenError;

/// Token families stored by digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// CSRF protection token.
    Csrf,
    /// Email verification link token.
    EmailVerification,
    /// Passwordless sign-in link token.
    MagicLink,
    /// One-time nonce.
    Nonce,
    /// Password reset token.
    PasswordReset,
    /// Re-authentication challenge.
    Reauth,
    /// Long-lived refresh token.
    Refresh,
    /// Session cookie value.
    Session,
    /// Elevated-privilege session.
    Sudo,
    /// Session awaiting second-factor completion.
    TwoFactorSession,
}

impl TokenKind {
    /// Every token kind.
    pub const ALL: [TokenKind; 10] = [
        Self::Csrf,
        Self::EmailVerification,
        Self::MagicLink,
        Self::Nonce,
        Self::PasswordReset,
        Self::Reauth,
        Self::Refresh,
        Self::Session,
        Self::Sudo,
        Self::TwoFactorSession,
    ];

    /// Canonical prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Csrf => prefix::CSRF_TOKEN,
            Self::EmailVerification => prefix::EMAIL_VERIFICATION,
            Self::MagicLink => prefix::MAGIC_LINK,
            Self::Nonce => prefix::NONCE,
            Self::PasswordReset => prefix::PASSWORD_RESET,
            Self::Reauth => prefix::REAUTH_TOKEN,
            Self::Refresh => prefix::REFRESH_TOKEN,
            Self::Session => prefix::SESSION,
            Self::Sudo => prefix::SUDO_SESSION,
            Self::TwoFactorSession => prefix::TWO_FACTOR_SESSION,
        }
    }

    /// Entropy budget.
    pub const fn entropy(self) -> EntropyClass {
        match self {
            Self::Nonce => EntropyClass::Identifier,
            Self::Refresh => EntropyClass::LongLived,
            _ => EntropyClass::ShortLived,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csrf => "csrf",
            Self::EmailVerification => "email-verification",
            Self::MagicLink => "magic-link",
            Self::Nonce => "nonce",
            Self::PasswordReset => "password-reset",
            Self::Reauth => "reauth",
            Self::Refresh => "refresh",
            Self::Session => "session",
            Self::Sudo => "sudo",
            Self::TwoFactorSession => "twofa-session",
        };
        f.write_str(name)
    }
}

impl FromStr for TokenKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| TokenError::UnknownKind {
                kind: "token kind",
                name: s.to_string(),
            })
    }
}

/// `prefix_` followed by URL-safe entropy of the given class.
pub(crate) fn mint(prefix: &str, class: EntropyClass) -> Result<String, TokenError> {
    let value = entropy::urlsafe(class.bytes())?;
    Ok(with_prefix(prefix, &value)?)
}

/// Mints a token of `kind` along with its storable digest.
pub fn generate_token(kind: TokenKind) -> Result<HashedToken, TokenError> {
    let plaintext = mint(kind.prefix(), kind.entropy())?;
    debug!(kind = %kind, entropy = %kind.entropy(), "Token minted");
    Ok(HashedToken::new(plaintext))
}

/// Mints an API key (`ak_`, long-lived) signed with `secret_key`.
///
/// The server stores only the signature and later checks presented keys
/// with [`verify_api_key`].
pub fn api_key(secret_key: impl AsRef<[u8]>) -> Result<SignedToken, TokenError> {
    let plaintext = mint(prefix::ACCESS_KEY, EntropyClass::LongLived)?;
    let signature = hmac_sign(&plaintext, secret_key)?;
    debug!("API key minted");
    Ok(SignedToken::new(plaintext, signature))
}

/// Checks a presented API key against its stored signature.
#[must_use]
pub fn verify_api_key(plaintext: &str, secret_key: impl AsRef<[u8]>, signature: &str) -> bool {
    hmac_verify(plaintext, secret_key, signature)
}

/// Mints a webhook signing secret (`whs_`) and encrypts it under
/// `encryption_secret`.
pub fn webhook_secret(
    encryption_secret: impl AsRef<[u8]>,
) -> Result<EncryptedSecret, TokenError> {
    let plaintext = mint(prefix::WEBHOOK_SECRET, EntropyClass::Secret)?;
    let encrypted = aes_encrypt(&plaintext, encryption_secret, None)?;
    debug!("Webhook secret minted");
    Ok(EncryptedSecret::new(plaintext, encrypted))
}

/// Recovers a webhook secret from its stored envelope.
pub fn reveal_webhook_secret(
    encrypted: &str,
    encryption_secret: impl AsRef<[u8]>,
) -> Result<String, TokenError> {
    Ok(aes_decrypt(encrypted, encryption_secret, None)?)
}
