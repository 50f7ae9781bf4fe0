//! Generic one-record-per-file persistence

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StorageError, StorageResult};

/// Persists exactly one encoded record per filename
///
/// `save` overwrites any prior content; `load` returns `None` for an
/// absent or undecodable file; `clear` deletes the file. There is no
/// versioning or migration, records are plain JSON.
pub struct PersistentService<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T> PersistentService<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a service storing its record at `directory/filename`
    ///
    /// # Errors
    ///
    /// Fails when the directory cannot be created.
    pub fn new(directory: &Path, filename: &str) -> StorageResult<Self> {
        fs::create_dir_all(directory)?;
        Ok(Self {
            path: directory.join(filename),
            _record: PhantomData,
        })
    }

    /// Create a service in the platform's local data directory
    ///
    /// # Errors
    ///
    /// Fails when the platform reports no local data directory or it
    /// cannot be created.
    pub fn in_default_directory(filename: &str) -> StorageResult<Self> {
        let directory = dirs::data_local_dir()
            .ok_or(StorageError::NoStorageDirectory)?
            .join("geofinder");
        Self::new(&directory, filename)
    }

    /// The file this service reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Encode and write the record, replacing any prior content
    ///
    /// # Errors
    ///
    /// Fails when encoding or the write fails; prior content is only
    /// replaced by a complete write.
    pub fn save(&self, record: &T) -> StorageResult<()> {
        let encoded = serde_json::to_vec(record)?;
        fs::write(&self.path, encoded)?;
        Ok(())
    }

    /// Decode the current file contents
    ///
    /// Absent and undecodable files both read as `None`; decode failures
    /// are logged, never surfaced.
    pub fn load(&self) -> Option<T> {
        let bytes = fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "discarding undecodable record");
                None
            }
        }
    }

    /// Delete the stored record; subsequent `load` returns `None`
    ///
    /// # Errors
    ///
    /// Fails on IO errors other than the file already being absent.
    pub fn clear(&self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(StorageError::Io(error)),
        }
    }
}
