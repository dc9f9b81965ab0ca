//! Bulletin board abstraction
//!
//! The board is a public, untrusted key/value store of named byte blobs:
//! identity public points under the identity name, group base points under
//! the group name, and group composites under `<members><group>`.
//!
//! # Invariants
//!
//! - Last write wins: `publish` overwrites silently, there is no versioning
//!   and no deletion.
//! - The board is never trusted for confidentiality or integrity. Every value
//!   loaded from it is validated as a curve point before use.

mod memory;
mod redb;

pub use memory::MemoryDirectory;
pub use self::redb::RedbDirectory;
use thiserror::Error;

/// Errors from board operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// No entry under the requested name
    #[error("no board entry named {name}")]
    NotFound {
        /// Requested key
        name: String,
    },

    /// Board backend failure
    #[error("board I/O error: {0}")]
    Io(String),
}

/// Named public values shared between parties
///
/// Must be Clone (shared between operations), Send + Sync, and synchronous.
/// Implementations share internal state, so clones see the same board.
pub trait Directory: Clone + Send + Sync + 'static {
    /// Publish `value` under `name`, replacing any existing entry.
    fn publish(&self, name: &str, value: &[u8]) -> Result<(), DirectoryError>;

    /// Load the value published under `name`.
    ///
    /// Returns `NotFound` if nothing has been published under that name.
    fn load(&self, name: &str) -> Result<Vec<u8>, DirectoryError>;
}
