//! Cryptographically secure entropy.
//!
//! Every function draws from the operating system's CSPRNG and validates its
//! arguments before touching it, so a rejected call consumes no randomness.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::{rngs::OsRng, Rng, RngCore};
use tracing::trace;

use crate::error::CryptoError;

fn check_len(len: usize, what: &str) -> Result<(), CryptoError> {
    if len == 0 {
        return Err(CryptoError::invalid(format!("{what} must be > 0")));
    }
    Ok(())
}

/// Returns `num_bytes` cryptographically secure random bytes.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if `num_bytes` is zero.
pub fn bytes(num_bytes: usize) -> Result<Vec<u8>, CryptoError> {
    check_len(num_bytes, "num_bytes")?;

    let mut buf = vec![0u8; num_bytes];
    OsRng.fill_bytes(&mut buf);
    trace!(len = num_bytes, "Drew entropy");
    Ok(buf)
}

/// Returns `num_bytes` random bytes encoded as `2 * num_bytes` lowercase hex
/// characters.
pub fn hex(num_bytes: usize) -> Result<String, CryptoError> {
    Ok(::hex::encode(bytes(num_bytes)?))
}

/// Returns `num_bytes` random bytes as unpadded URL-safe base64.
///
/// The output length is `ceil(num_bytes * 4 / 3)`.
pub fn urlsafe(num_bytes: usize) -> Result<String, CryptoError> {
    Ok(URL_SAFE_NO_PAD.encode(bytes(num_bytes)?))
}

/// Returns `length` characters sampled uniformly and independently from
/// `alphabet`.
///
/// Indices are drawn with `gen_range`, which rejects out-of-zone samples and
/// so carries no modulo bias for alphabets of any size.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidArgument`] if `length` is zero or `alphabet`
/// is empty.
pub fn random_string(length: usize, alphabet: &str) -> Result<String, CryptoError> {
    check_len(length, "length")?;

    let symbols: Vec<char> = alphabet.chars().collect();
    if symbols.is_empty() {
        return Err(CryptoError::invalid("alphabet cannot be empty"));
    }

    let mut rng = OsRng;
    let out = (0..length)
        .map(|_| symbols[rng.gen_range(0..symbols.len())])
        .collect();
    Ok(out)
}

/// Picks one element of `choices` uniformly at random.
pub fn choose<T: Copy>(choices: &[T]) -> Result<T, CryptoError> {
    if choices.is_empty() {
        return Err(CryptoError::invalid("choices cannot be empty"));
    }
    Ok(choices[OsRng.gen_range(0..choices.len())])
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_bytes_length() {
        for len in [1, 16, 32, 64, 128] {
            assert_eq!(bytes(len).unwrap().len(), len);
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(matches!(bytes(0), Err(CryptoError::InvalidArgument(_))));
        assert!(matches!(hex(0), Err(CryptoError::InvalidArgument(_))));
        assert!(matches!(urlsafe(0), Err(CryptoError::InvalidArgument(_))));
        assert!(matches!(
            random_string(0, "abc"),
            Err(CryptoError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_hex_format() {
        let token = hex(16).unwrap();
        assert_eq!(token.len(), 32);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_urlsafe_length_and_alphabet() {
        for (n, expected) in [(1, 2), (2, 3), (3, 4), (16, 22), (32, 43), (64, 86)] {
            let token = urlsafe(n).unwrap();
            assert_eq!(token.len(), expected, "n = {n}");
            assert!(token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
            assert!(!token.contains('='));
        }
    }

    #[test]
    fn test_random_string_empty_alphabet() {
        let result = random_string(8, "");
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn test_random_string_uses_alphabet() {
        let s = random_string(256, "01").unwrap();
        assert_eq!(s.chars().count(), 256);
        assert!(s.chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn test_random_string_multibyte_alphabet() {
        let s = random_string(10, "αβγ").unwrap();
        assert_eq!(s.chars().count(), 10);
        assert!(s.chars().all(|c| "αβγ".contains(c)));
    }

    #[test]
    fn test_random_string_covers_alphabet() {
        // 3 does not divide 256; every symbol must still show up.
        let s = random_string(3000, "abc").unwrap();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for c in s.chars() {
            *counts.entry(c).or_default() += 1;
        }
        assert_eq!(counts.len(), 3);
        for count in counts.values() {
            assert!(*count > 800, "skewed distribution: {counts:?}");
        }
    }

    #[test]
    fn test_choose() {
        let picked = choose(&["01", "02", "03"]).unwrap();
        assert!(["01", "02", "03"].contains(&picked));
        assert!(choose::<u8>(&[]).is_err());
    }

    #[test]
    fn test_randomness_distribution() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(hex(8).unwrap()), "duplicate token generated");
        }
    }
}
