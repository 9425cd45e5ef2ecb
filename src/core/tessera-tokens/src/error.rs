//! Generator error types.

use tessera_crypto::CryptoError;
use thiserror::Error;

/// Errors that can occur while minting or decoding tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Underlying primitive failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Invalid input to a generator.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Unrecognised token or key kind name.
    #[error("unknown {kind}: {name}")]
    UnknownKind {
        /// Which family was being parsed.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// JWT signing, signature or claim validation failed.
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// A JWT lacks a claim that must always be present.
    #[error("missing required claim: {0}")]
    MissingClaim(&'static str),

    /// A JWT claim is present but unacceptable.
    #[error("invalid claim '{claim}': {reason}")]
    InvalidClaim {
        /// Offending claim name.
        claim: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}
