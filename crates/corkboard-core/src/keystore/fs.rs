//! Filesystem-backed key store.
//!
//! Each identity owns a directory `<root>/<name>/` holding raw binary files.
//! Files are overwritten in place; there is no locking, so concurrent writers
//! on the same identity race.
//!
//! On unix, identity directories are created `0700` and files `0600`.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use super::{KeyStore, KeyStoreError};

/// Key store rooted at a local data directory.
#[derive(Clone, Debug)]
pub struct FsKeyStore {
    root: PathBuf,
}

impl FsKeyStore {
    /// Create a key store rooted at `root`.
    ///
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding `name`'s material.
    ///
    /// # Errors
    ///
    /// Returns `InvalidName` if `name` would escape the data directory.
    pub fn identity_dir(&self, name: &str) -> Result<PathBuf, KeyStoreError> {
        validate_component(name)?;
        Ok(self.root.join(name))
    }
}

/// Reject names that are not a single, plain path component.
fn validate_component(name: &str) -> Result<(), KeyStoreError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(KeyStoreError::InvalidName { name: name.to_string() });
    }
    Ok(())
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

/// Write `bytes` to `path`, readable by the owner only.
///
/// Tightens the mode of files left behind by older versions as well.
fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

        options.mode(0o600);
        let mut file = options.open(path)?;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
        file.write_all(bytes)
    }

    #[cfg(not(unix))]
    {
        options.open(path)?.write_all(bytes)
    }
}

impl KeyStore for FsKeyStore {
    fn write_material(&self, name: &str, file: &str, bytes: &[u8]) -> Result<(), KeyStoreError> {
        validate_component(file)?;
        let dir = self.identity_dir(name)?;
        create_private_dir(&dir).map_err(|e| KeyStoreError::Io(e.to_string()))?;

        let path = dir.join(file);
        write_private(&path, bytes).map_err(|e| KeyStoreError::Io(e.to_string()))?;

        debug!(identity = name, file, len = bytes.len(), "wrote key material");
        Ok(())
    }

    fn read_material(&self, name: &str, file: &str) -> Result<Vec<u8>, KeyStoreError> {
        validate_component(file)?;
        let path = self.identity_dir(name)?.join(file);

        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(KeyStoreError::NotFound { name: name.to_string(), file: file.to_string() })
            },
            Err(e) => Err(KeyStoreError::Io(e.to_string())),
        }
    }
}
