use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, instrument};

use crate::models::{RepositoryError, RepositoryResult};

/// String key/value storage with the semantics of the browser's local storage
pub trait LocalStorage: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove_item(&self, key: &str) -> RepositoryResult<()>;
}

/// Local storage backed by one file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", urlencoding::encode(key)))
    }
}

impl LocalStorage for FileStorage {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Key not present in storage");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self, value), fields(root = %self.root.display(), bytes = value.len()))]
    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()> {
        fs::create_dir_all(&self.root)?;

        let target = self.path_for(key);
        let staging = target.with_extension("json.tmp");

        // Readers only ever see the previous or the new value.
        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&staging, &target)?;

        debug!("Stored value");
        Ok(())
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn remove_item(&self, key: &str) -> RepositoryResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process local storage, used by tests and embedders without a disk
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with a single entry
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.to_string());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> RepositoryResult<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> RepositoryResult<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }
}
