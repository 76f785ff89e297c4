//! Shared-secret check.

use subtle::ConstantTimeEq;

/// Compare the submitted secret against the configured one.
///
/// Constant-time over equal-length inputs. A missing submission never
/// matches, not even an empty configured secret.
pub fn secrets_match(provided: Option<&str>, expected: &str) -> bool {
    match provided {
        Some(provided) => provided.as_bytes().ct_eq(expected.as_bytes()).into(),
        None => false,
    }
}
