//! Key store error types.

use thiserror::Error;

/// Errors from local key material storage
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    /// No such file in the identity's namespace
    #[error("{file} not found for identity {name}")]
    NotFound {
        /// Identity name
        name: String,
        /// Requested file
        file: String,
    },

    /// Stored material has the wrong length
    #[error("corrupt {file}: expected {expected} bytes, found {actual}")]
    Corrupt {
        /// File that failed to parse
        file: String,
        /// Expected length
        expected: usize,
        /// Length found on disk
        actual: usize,
    },

    /// Name cannot be used as a storage namespace or file component
    #[error("invalid name for local storage: {name:?}")]
    InvalidName {
        /// Rejected name
        name: String,
    },

    /// Underlying storage failure
    #[error("key store I/O error: {0}")]
    Io(String),
}
