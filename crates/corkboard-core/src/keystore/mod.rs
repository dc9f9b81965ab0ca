//! Local key material storage
//!
//! Trait-based abstraction for persisting an identity's keypair and the
//! secrets derived from it. Material is stored as raw bytes in files
//! namespaced by identity name:
//!
//! | file | content |
//! |---|---|
//! | `pub.bin` | 32-byte public point |
//! | `key.bin` | 32-byte private scalar |
//! | `<peer>.secret.bin` | raw pairwise shared secret with `<peer>` |
//! | `<group>.secret` | resolved group secret for `<group>` |
//!
//! Stores never inspect, log or print the material they hold.

mod error;
mod fs;
mod memory;

use corkboard_crypto::{PrivateScalar, PublicPoint, SharedSecret};
pub use error::KeyStoreError;
pub use fs::FsKeyStore;
pub use memory::MemoryKeyStore;

/// File holding the public point
pub const PUBLIC_FILE: &str = "pub.bin";

/// File holding the private scalar
pub const PRIVATE_FILE: &str = "key.bin";

/// File holding the pairwise secret with `peer`.
pub fn pairwise_secret_file(peer: &str) -> String {
    format!("{peer}.secret.bin")
}

/// File holding the resolved secret for `group`.
pub fn group_secret_file(group: &str) -> String {
    format!("{group}.secret")
}

/// Storage abstraction for local key material
///
/// Must be Clone (shared between operations), Send + Sync, and synchronous.
/// Implementations share internal state, so clones access the same
/// underlying store.
///
/// Backends implement raw reads and writes; the typed accessors are provided.
pub trait KeyStore: Clone + Send + Sync + 'static {
    /// Write `bytes` to `file` in `name`'s namespace, overwriting silently.
    fn write_material(&self, name: &str, file: &str, bytes: &[u8]) -> Result<(), KeyStoreError>;

    /// Read `file` from `name`'s namespace.
    ///
    /// Returns `NotFound` if the file does not exist.
    fn read_material(&self, name: &str, file: &str) -> Result<Vec<u8>, KeyStoreError>;

    /// Persist the private scalar for `name`.
    fn persist(&self, name: &str, scalar: &PrivateScalar) -> Result<(), KeyStoreError> {
        self.write_material(name, PRIVATE_FILE, scalar.as_bytes())
    }

    /// Persist the public point for `name`.
    fn persist_public(&self, name: &str, point: &PublicPoint) -> Result<(), KeyStoreError> {
        self.write_material(name, PUBLIC_FILE, point.as_bytes())
    }

    /// Load the private scalar for `name`.
    fn load_private(&self, name: &str) -> Result<PrivateScalar, KeyStoreError> {
        let bytes = self.read_material(name, PRIVATE_FILE)?;
        PrivateScalar::from_slice(&bytes).map_err(|_| KeyStoreError::Corrupt {
            file: PRIVATE_FILE.to_string(),
            expected: 32,
            actual: bytes.len(),
        })
    }

    /// Load the public point for `name`.
    fn load_public(&self, name: &str) -> Result<PublicPoint, KeyStoreError> {
        let bytes = self.read_material(name, PUBLIC_FILE)?;
        PublicPoint::from_slice(&bytes).map_err(|_| KeyStoreError::Corrupt {
            file: PUBLIC_FILE.to_string(),
            expected: 32,
            actual: bytes.len(),
        })
    }

    /// Persist the pairwise secret between `name` and `peer`.
    fn persist_shared_secret(
        &self,
        name: &str,
        peer: &str,
        secret: &SharedSecret,
    ) -> Result<(), KeyStoreError> {
        self.write_material(name, &pairwise_secret_file(peer), secret.as_bytes())
    }

    /// Persist the resolved group secret for `group`.
    ///
    /// Overwrites any earlier resolution, e.g. from an aborted exchange.
    fn persist_group_secret(
        &self,
        name: &str,
        group: &str,
        secret: &SharedSecret,
    ) -> Result<(), KeyStoreError> {
        self.write_material(name, &group_secret_file(group), secret.as_bytes())
    }

    /// Load the resolved group secret for `group`.
    fn load_group_secret(&self, name: &str, group: &str) -> Result<SharedSecret, KeyStoreError> {
        let file = group_secret_file(group);
        let bytes = self.read_material(name, &file)?;
        SharedSecret::from_slice(&bytes).map_err(|_| KeyStoreError::Corrupt {
            file,
            expected: 32,
            actual: bytes.len(),
        })
    }
}
