//! Short-lived HS256 JSON Web Tokens.
//!
//! The algorithm is fixed on both sides. Tokens always carry `iat` and
//! `exp`, set here from the current UTC time; callers cannot supply either.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::TokenError;

/// A JWT claim set.
pub type Claims = Map<String, Value>;

/// Lifetime used when the caller has no preference (15 minutes).
pub const DEFAULT_JWT_EXPIRY_SECS: u64 = 900;

const RESERVED_CLAIMS: [&str; 2] = ["exp", "iat"];

/// Signs `payload` as an HS256 JWT valid for `expiry_seconds`.
///
/// # Errors
///
/// Returns [`TokenError::InvalidArgument`] if `expiry_seconds` is zero or
/// `payload` already contains `exp` or `iat`.
pub fn encode_jwt(
    payload: &Claims,
    secret: impl AsRef<[u8]>,
    expiry_seconds: u64,
) -> Result<String, TokenError> {
    if expiry_seconds == 0 {
        return Err(TokenError::InvalidArgument(
            "expiry_seconds must be > 0".to_string(),
        ));
    }
    if let Some(claim) = RESERVED_CLAIMS.iter().find(|c| payload.contains_key(**c)) {
        return Err(TokenError::InvalidArgument(format!(
            "payload must not contain reserved claim '{claim}'"
        )));
    }

    let now = Utc::now().timestamp();
    let exp = i64::try_from(expiry_seconds)
        .ok()
        .and_then(|secs| now.checked_add(secs))
        .ok_or_else(|| TokenError::InvalidArgument("expiry_seconds out of range".to_string()))?;

    let mut claims = payload.clone();
    claims.insert("iat".to_string(), Value::from(now));
    claims.insert("exp".to_string(), Value::from(exp));

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    debug!(claims = claims.len(), expiry_seconds, "JWT issued");
    Ok(token)
}

/// Verifies an HS256 JWT and returns its claims.
///
/// Rejects any other algorithm, a bad signature, a token without `exp` or
/// `iat`, and an expired token. No clock leeway is granted.
pub fn decode_jwt(token: &str, secret: impl AsRef<[u8]>) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&RESERVED_CLAIMS);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &validation)
        .inspect_err(|e| debug!(error = %e, "JWT rejected"))?;

    check_issued_at(&data.claims, Utc::now().timestamp())?;
    Ok(data.claims)
}

/// `required_spec_claims` does not cover `iat`, so its presence, type and
/// ordering against `now` are checked here.
fn check_issued_at(claims: &Claims, now: i64) -> Result<(), TokenError> {
    let iat = claims
        .get("iat")
        .ok_or(TokenError::MissingClaim("iat"))?
        .as_i64()
        .ok_or(TokenError::InvalidClaim {
            claim: "iat",
            reason: "must be an integer",
        })?;

    if iat > now {
        debug!(iat, now, "JWT issued in the future");
        return Err(TokenError::InvalidClaim {
            claim: "iat",
            reason: "issued in the future",
        });
    }
    Ok(())
}
