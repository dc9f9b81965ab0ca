//! Error types for cryptographic operations

use thiserror::Error;

/// Errors from key exchange and message encryption
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Public input is not a usable curve point
    ///
    /// Either the encoding has the wrong length or the scalar multiplication
    /// was non-contributory (low-order or identity point).
    #[error("invalid point: {reason}")]
    InvalidPoint {
        /// Why the point was rejected
        reason: String,
    },

    /// AEAD tag did not verify (tampered ciphertext or wrong key)
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Input buffer has the wrong length
    #[error("invalid length: expected at least {expected}, got {actual}")]
    InvalidLength {
        /// Minimum length required
        expected: usize,
        /// Length actually provided
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CryptoError::InvalidLength { expected: 32, actual: 7 };
        assert_eq!(err.to_string(), "invalid length: expected at least 32, got 7");
    }
}
