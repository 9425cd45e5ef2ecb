//! Constant-time equality for secret-bearing comparisons.

use subtle::ConstantTimeEq;

/// Returns `true` iff `a` and `b` are equal.
///
/// Runs in time independent of where the first differing byte sits. Only the
/// lengths, which are not secret, may short-circuit the comparison.
///
/// Use this for digests, MACs and other secret-derived values. Plain `==` is
/// fine everywhere else.
#[must_use]
pub fn timing_safe_equals(a: impl AsRef<[u8]>, b: impl AsRef<[u8]>) -> bool {
    a.as_ref().ct_eq(b.as_ref()).into()
}
