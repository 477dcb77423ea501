//! Named blob storage.
//!
//! Presets are persisted as a single named byte blob. The trait keeps the
//! store independent of where those bytes live.

use crate::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Key-value byte store addressed by blob name.
pub trait BlobStore: Send + Sync {
    /// Returns the blob's bytes, or `None` if it does not exist.
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Creates or replaces a blob.
    fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Removes a blob. Removing a missing blob is not an error.
    fn remove(&self, name: &str) -> StoreResult<()>;
}

/// In-process blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a blob with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(blobs.get(name).cloned())
    }

    fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, name: &str) -> StoreResult<()> {
        let mut blobs = self.blobs.lock().unwrap_or_else(PoisonError::into_inner);
        blobs.remove(name);
        Ok(())
    }
}

/// Blob store backed by one `<name>.json` file per blob in a directory.
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash mid-write leaves the previous blob intact.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl BlobStore for FsBlobStore {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(name)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, name: &str, bytes: &[u8]) -> StoreResult<()> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.root)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, name: &str) -> StoreResult<()> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
