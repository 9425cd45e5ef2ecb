//! Prefixed identifier formatting.
//!
//! Every minted identifier has the shape `prefix_value`, with exactly one
//! separator, so it can be split unambiguously on the first `_`.

use crate::error::CryptoError;

/// Separator between an identifier's prefix and its value.
pub const SEPARATOR: char = '_';

/// Joins `prefix` and `value` with exactly one [`SEPARATOR`].
///
/// Leading and trailing separators are stripped from `prefix`, leading ones
/// from `value`.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if the stripped prefix is empty.
pub fn with_prefix(prefix: &str, value: &str) -> Result<String, CryptoError> {
    let prefix = prefix.trim_matches(SEPARATOR);
    let value = value.trim_start_matches(SEPARATOR);

    if prefix.is_empty() {
        return Err(CryptoError::invalid("prefix must be a non-empty string"));
    }

    let mut out = String::with_capacity(prefix.len() + 1 + value.len());
    out.push_str(prefix);
    out.push(SEPARATOR);
    out.push_str(value);
    Ok(out)
}
