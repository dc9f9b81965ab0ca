#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use super::{Directory, DirectoryError};

/// In-memory board for testing and simulation
///
/// State is wrapped in Arc<Mutex<>> so every party holding a clone sees the
/// same entries. Uses `lock().expect()`, which panics if the mutex is
/// poisoned - acceptable for test code.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryDirectory {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if an entry exists under `name`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.lock().expect("Mutex poisoned").contains_key(name)
    }
}

impl Directory for MemoryDirectory {
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn publish(&self, name: &str, value: &[u8]) -> Result<(), DirectoryError> {
        self.entries.lock().expect("Mutex poisoned").insert(name.to_string(), value.to_vec());
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned. This is acceptable for test
    /// code.
    #[allow(clippy::expect_used)]
    fn load(&self, name: &str) -> Result<Vec<u8>, DirectoryError> {
        self.entries
            .lock()
            .expect("Mutex poisoned")
            .get(name)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound { name: name.to_string() })
    }
}
