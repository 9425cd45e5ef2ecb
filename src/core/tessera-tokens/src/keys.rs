//! Operational keys.
//!
//! Short hex identifiers for idempotency, deduplication and similar
//! bookkeeping. Keys that gate an action are returned with their digest;
//! purely descriptive keys (fingerprint, trace, classification, time) are
//! plain strings.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use tessera_crypto::{entropy, with_prefix};
use tracing::debug;

use crate::artifact::HashedToken;
use crate::catalog::prefix;
use crate::error::TokenError;

/// Random bytes behind every hex key (16 hex characters).
pub const KEY_ENTROPY_BYTES: usize = 8;

/// Leading tiers of a classification key.
pub const CLASSIFICATION_TIERS: [&str; 3] = ["01", "02", "03"];

/// Random digits appended to a time key.
pub const TIME_KEY_SUFFIX_DIGITS: usize = 4;

const DIGITS: &str = "0123456789";

/// Key families stored by digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Confirms a pending action.
    Confirmation,
    /// Suppresses duplicate deliveries.
    Deduplication,
    /// Tracks a failed operation for retry.
    Failure,
    /// Makes a request safe to retry.
    Idempotency,
    /// Identifies a server-side session record.
    Session,
}

impl KeyKind {
    /// Every key kind.
    pub const ALL: [KeyKind; 5] = [
        Self::Confirmation,
        Self::Deduplication,
        Self::Failure,
        Self::Idempotency,
        Self::Session,
    ];

    /// Canonical prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Confirmation => prefix::CONFIRMATION_KEY,
            Self::Deduplication => prefix::DEDUPLICATION_KEY,
            Self::Failure => prefix::FAILURE_KEY,
            Self::Idempotency => prefix::IDEMPOTENCY_KEY,
            Self::Session => prefix::SESSION_KEY,
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmation => write!(f, "confirmation"),
            Self::Deduplication => write!(f, "deduplication"),
            Self::Failure => write!(f, "failure"),
            Self::Idempotency => write!(f, "idempotency"),
            Self::Session => write!(f, "session"),
        }
    }
}

impl FromStr for KeyKind {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| TokenError::UnknownKind {
                kind: "key kind",
                name: s.to_string(),
            })
    }
}

fn hex_key(prefix: &str) -> Result<String, TokenError> {
    let value = entropy::hex(KEY_ENTROPY_BYTES)?;
    Ok(with_prefix(prefix, &value)?)
}

/// Mints a key of `kind` along with its storable digest.
pub fn generate_key(kind: KeyKind) -> Result<HashedToken, TokenError> {
    let plaintext = hex_key(kind.prefix())?;
    debug!(kind = %kind, "Key minted");
    Ok(HashedToken::new(plaintext))
}

/// `fk_` followed by 16 hex characters.
pub fn fingerprint_key() -> Result<String, TokenError> {
    hex_key(prefix::FINGERPRINT_KEY)
}

/// `trk_` followed by 16 hex characters.
pub fn trace_key() -> Result<String, TokenError> {
    hex_key(prefix::TRACE_KEY)
}

/// `clk_` followed by a tier (`01`, `02` or `03`) and 14 hex characters.
pub fn classification_key() -> Result<String, TokenError> {
    let tier = entropy::choose(&CLASSIFICATION_TIERS)?;
    let suffix = entropy::hex(KEY_ENTROPY_BYTES - 1)?;
    Ok(with_prefix(prefix::CLASSIFICATION_KEY, &format!("{tier}{suffix}"))?)
}

/// `tk_` followed by the current UTC time as `YYYYMMDDHHMMSS`, an
/// underscore and four random digits.
///
/// Time keys sort chronologically by string order.
pub fn time_key() -> Result<String, TokenError> {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let suffix = entropy::random_string(TIME_KEY_SUFFIX_DIGITS, DIGITS)?;
    Ok(with_prefix(prefix::TIME_KEY, &format!("{timestamp}_{suffix}"))?)
}
