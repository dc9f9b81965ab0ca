//! Redb-backed local board.
//!
//! A single database file stands in for the shared board when all parties
//! run against the same filesystem. Each publish is its own ACID write
//! transaction, so a crash never leaves a torn entry.

use std::{path::Path, sync::Arc};

use redb::{Database, TableDefinition};
use tracing::debug;

use super::{Directory, DirectoryError};

/// Table: entries
/// Key: UTF-8 entry name
/// Value: raw published bytes
const ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("entries");

/// Durable board backed by Redb.
///
/// Thread-safe through Redb's internal locking. Clone is cheap (Arc).
#[derive(Clone)]
pub struct RedbDirectory {
    db: Arc<Database>,
}

impl RedbDirectory {
    /// Open or create a board at the given path.
    ///
    /// Creates the entries table if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Io` if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let db = Database::create(path.as_ref()).map_err(|e| DirectoryError::Io(e.to_string()))?;

        let txn = db.begin_write().map_err(|e| DirectoryError::Io(e.to_string()))?;
        {
            let _ = txn.open_table(ENTRIES).map_err(|e| DirectoryError::Io(e.to_string()))?;
        }
        txn.commit().map_err(|e| DirectoryError::Io(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }
}

impl Directory for RedbDirectory {
    fn publish(&self, name: &str, value: &[u8]) -> Result<(), DirectoryError> {
        let txn = self.db.begin_write().map_err(|e| DirectoryError::Io(e.to_string()))?;

        {
            let mut table =
                txn.open_table(ENTRIES).map_err(|e| DirectoryError::Io(e.to_string()))?;
            table.insert(name, value).map_err(|e| DirectoryError::Io(e.to_string()))?;
        }

        txn.commit().map_err(|e| DirectoryError::Io(e.to_string()))?;

        debug!(name, len = value.len(), "published board entry");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Vec<u8>, DirectoryError> {
        let txn = self.db.begin_read().map_err(|e| DirectoryError::Io(e.to_string()))?;
        let table = txn.open_table(ENTRIES).map_err(|e| DirectoryError::Io(e.to_string()))?;

        match table.get(name).map_err(|e| DirectoryError::Io(e.to_string()))? {
            Some(value) => Ok(value.value().to_vec()),
            None => Err(DirectoryError::NotFound { name: name.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn publish_then_load() {
        let dir = tempdir().unwrap();
        let board = RedbDirectory::open(dir.path().join("board.redb")).unwrap();

        board.publish("alice", &[7; 32]).unwrap();
        assert_eq!(board.load("alice").unwrap(), vec![7; 32]);
    }

    #[test]
    fn missing_entry_is_not_found() {
        let dir = tempdir().unwrap();
        let board = RedbDirectory::open(dir.path().join("board.redb")).unwrap();

        assert_eq!(
            board.load("aliceG1"),
            Err(DirectoryError::NotFound { name: "aliceG1".to_string() })
        );
    }

    #[test]
    fn overwrite_replaces_value() {
        let dir = tempdir().unwrap();
        let board = RedbDirectory::open(dir.path().join("board.redb")).unwrap();

        board.publish("G1", &[1; 32]).unwrap();
        board.publish("G1", &[2; 32]).unwrap();
        assert_eq!(board.load("G1").unwrap(), vec![2; 32]);
    }

    #[test]
    fn entries_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.redb");

        {
            let board = RedbDirectory::open(&path).unwrap();
            board.publish("bob", &[9; 32]).unwrap();
        }

        let reopened = RedbDirectory::open(&path).unwrap();
        assert_eq!(reopened.load("bob").unwrap(), vec![9; 32]);
    }
}
