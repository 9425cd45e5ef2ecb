//! Entropy budgets and canonical prefixes.
//!
//! Prefixes make a leaked value recognisable at a glance in logs and
//! secret scanners, and let storage distinguish token families.

use std::fmt;

/// How many random bytes an artifact gets, by sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyClass {
    /// Non-sensitive unique markers.
    Identifier,
    /// Short-duration authentication artifacts.
    ShortLived,
    /// Tokens that persist for long periods.
    LongLived,
    /// Symmetric keys and other secrets.
    Secret,
}

impl EntropyClass {
    /// Number of random bytes for this class.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Identifier => 16,
            Self::ShortLived | Self::Secret => 32,
            Self::LongLived => 64,
        }
    }
}

impl fmt::Display for EntropyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier => write!(f, "identifier"),
            Self::ShortLived => write!(f, "short-lived"),
            Self::LongLived => write!(f, "long-lived"),
            Self::Secret => write!(f, "secret"),
        }
    }
}

/// Canonical prefixes.
pub mod prefix {
    /// API access key.
    pub const ACCESS_KEY: &str = "ak";
    /// Refresh token.
    pub const REFRESH_TOKEN: &str = "rt";
    /// CSRF token.
    pub const CSRF_TOKEN: &str = "csrf";
    /// Session token.
    pub const SESSION: &str = "sess";
    /// Webhook signing secret.
    pub const WEBHOOK_SECRET: &str = "whs";
    /// Email verification token.
    pub const EMAIL_VERIFICATION: &str = "ev";
    /// Magic link token.
    pub const MAGIC_LINK: &str = "ml";
    /// Elevated (sudo) session token.
    pub const SUDO_SESSION: &str = "sudo";
    /// Pending two-factor session.
    pub const TWO_FACTOR_SESSION: &str = "tfas";
    /// Password reset token.
    pub const PASSWORD_RESET: &str = "pr";
    /// Re-authentication challenge.
    pub const REAUTH_TOKEN: &str = "ra";
    /// One-time nonce.
    pub const NONCE: &str = "n";
    /// Data-at-rest encryption key.
    pub const ENCRYPTION_KEY: &str = "ek";
    /// Generic secret key.
    pub const SECRET_KEY: &str = "sk";

    /// Confirmation key.
    pub const CONFIRMATION_KEY: &str = "ck";
    /// Deduplication key.
    pub const DEDUPLICATION_KEY: &str = "dk";
    /// Device or user fingerprint key.
    pub const FINGERPRINT_KEY: &str = "fk";
    /// Idempotency key.
    pub const IDEMPOTENCY_KEY: &str = "idemk";
    /// Session key.
    pub const SESSION_KEY: &str = "ssk";
    /// Time-stamped key.
    pub const TIME_KEY: &str = "tk";
    /// Trace key.
    pub const TRACE_KEY: &str = "trk";
    /// Classification key.
    pub const CLASSIFICATION_KEY: &str = "clk";
    /// Failure key.
    pub const FAILURE_KEY: &str = "flk";
}
