#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{KeyStore, KeyStoreError};

/// In-memory key store for testing and simulation
///
/// Maps `(identity, file)` to raw bytes. State is wrapped in Arc<Mutex<>> so
/// clones share it. Uses `lock().expect()`, which panics if the mutex is
/// poisoned - acceptable for test code.
#[derive(Clone, Default)]
pub struct MemoryKeyStore {
    inner: Arc<Mutex<HashMap<(String, String), Vec<u8>>>>,
}

impl MemoryKeyStore {
    /// Create a new empty `MemoryKeyStore`
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files stored across all identities.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn file_count(&self) -> usize {
        self.inner.lock().expect("Mutex poisoned").len()
    }
}

impl KeyStore for MemoryKeyStore {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn write_material(&self, name: &str, file: &str, bytes: &[u8]) -> Result<(), KeyStoreError> {
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .insert((name.to_string(), file.to_string()), bytes.to_vec());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn read_material(&self, name: &str, file: &str) -> Result<Vec<u8>, KeyStoreError> {
        self.inner
            .lock()
            .expect("Mutex poisoned")
            .get(&(name.to_string(), file.to_string()))
            .cloned()
            .ok_or_else(|| KeyStoreError::NotFound {
                name: name.to_string(),
                file: file.to_string(),
            })
    }
}
