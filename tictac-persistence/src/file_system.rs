use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tictac_core::{Result, StorageBackend, TicTacError};

/// File-based key-value storage.
///
/// Each key is stored in its own file inside the data directory, so entries
/// survive process restarts. Writes go to a temporary file first and are then
/// renamed into place, so a reader never observes a half-written entry.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    data_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file-based storage instance.
    ///
    /// # Arguments
    /// * `data_dir` - Directory where entry files will be stored
    ///
    /// # Errors
    /// * Returns error if the data directory cannot be created
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref();

        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                TicTacError::persistence(format!("Failed to create data directory: {}", e))
            })?;
        }

        Ok(Self {
            data_dir: data_dir.to_path_buf(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file holding `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.dat", encode_key(key)))
    }
}

/// Maps a key to a file name: ASCII alphanumerics, `-` and `_` pass through,
/// every other byte becomes `%XX`. The mapping is injective, so distinct keys
/// never share a file.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

impl StorageBackend for FileSystemStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.entry_path(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TicTacError::persistence(format!(
                "Failed to read entry '{}': {}",
                key, e
            ))),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.entry_path(key);
        let temp_path = path.with_extension("tmp");

        fs::write(&temp_path, value).map_err(|e| {
            TicTacError::persistence(format!("Failed to write entry to temp file: {}", e))
        })?;

        // Atomically replace the old entry with the new one
        fs::rename(&temp_path, &path).map_err(|e| {
            TicTacError::persistence(format!("Failed to rename temp file to entry file: {}", e))
        })?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TicTacError::persistence(format!(
                "Failed to remove entry '{}': {}",
                key, e
            ))),
        }
    }

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.entry_path(key).is_file())
    }
}
