//! Error taxonomy for Corkboard operations.
//!
//! Each layer has its own strongly-typed error ([`KeyStoreError`],
//! [`DirectoryError`], [`CryptoError`]). Operations surface them through
//! [`Error`], which keeps only the distinctions a caller can act on. Nothing
//! is retried and nothing is downgraded.

use corkboard_crypto::CryptoError;
use thiserror::Error;

use crate::{directory::DirectoryError, keystore::KeyStoreError};

/// Errors returned by identity, messaging and group operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No local key material for this identity
    #[error("no local key material for {name}: missing {file}")]
    IdentityNotFound {
        /// Identity name
        name: String,
        /// Missing file within the identity's namespace
        file: String,
    },

    /// Requested entry is absent from the board
    ///
    /// During group agreement this usually means the round that publishes
    /// `name` has not run yet.
    #[error("directory entry not found: {name}")]
    DirectoryNotFound {
        /// Directory key that was requested
        name: String,
    },

    /// Malformed or degenerate public value
    #[error("invalid point: {0}")]
    InvalidPoint(String),

    /// Malformed armored input or envelope
    #[error("decode error: {0}")]
    Decode(String),

    /// AEAD tag mismatch (tampered ciphertext or wrong key)
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Local storage failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Returns true if this error is a missing group composite.
    ///
    /// Group composites are named `<members><group>`, so a lookup miss on a
    /// key that strictly extends the group name means an earlier round has
    /// not published yet. Callers must rerun in the right order; retrying
    /// blindly will not help.
    pub fn is_missing_round(&self, group: &str) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { name } if name.len() > group.len() && name.ends_with(group)
        )
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::InvalidPoint { reason } => Self::InvalidPoint(reason),
            CryptoError::AuthenticationFailed => Self::AuthenticationFailed,
            CryptoError::InvalidLength { .. } => Self::Decode(err.to_string()),
        }
    }
}

impl From<KeyStoreError> for Error {
    fn from(err: KeyStoreError) -> Self {
        match err {
            KeyStoreError::NotFound { name, file } => Self::IdentityNotFound { name, file },
            KeyStoreError::Corrupt { .. } | KeyStoreError::InvalidName { .. } => {
                Self::Io(err.to_string())
            },
            KeyStoreError::Io(msg) => Self::Io(msg),
        }
    }
}

impl From<DirectoryError> for Error {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::NotFound { name } => Self::DirectoryNotFound { name },
            DirectoryError::Io(msg) => Self::Io(msg),
        }
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crypto_errors_map_to_taxonomy() {
        assert_eq!(
            Error::from(CryptoError::InvalidPoint { reason: "low order".to_string() }),
            Error::InvalidPoint("low order".to_string())
        );
        assert_eq!(Error::from(CryptoError::AuthenticationFailed), Error::AuthenticationFailed);
        assert!(matches!(
            Error::from(CryptoError::InvalidLength { expected: 32, actual: 4 }),
            Error::Decode(_)
        ));
    }

    #[test]
    fn keystore_not_found_is_identity_not_found() {
        let err = Error::from(KeyStoreError::NotFound {
            name: "alice".to_string(),
            file: "key.bin".to_string(),
        });
        assert_eq!(
            err,
            Error::IdentityNotFound { name: "alice".to_string(), file: "key.bin".to_string() }
        );
        assert_eq!(err.to_string(), "no local key material for alice: missing key.bin");
    }

    #[test]
    fn directory_not_found_keeps_name() {
        let err = Error::from(DirectoryError::NotFound { name: "bobG1".to_string() });
        assert_eq!(err, Error::DirectoryNotFound { name: "bobG1".to_string() });
    }

    #[test]
    fn missing_round_detection() {
        let composite = Error::DirectoryNotFound { name: "bobcarolG1".to_string() };
        assert!(composite.is_missing_round("G1"));

        let base = Error::DirectoryNotFound { name: "G1".to_string() };
        assert!(!base.is_missing_round("G1"));

        let unrelated = Error::DirectoryNotFound { name: "alice".to_string() };
        assert!(!unrelated.is_missing_round("G1"));

        assert!(!Error::AuthenticationFailed.is_missing_round("G1"));
    }
}
