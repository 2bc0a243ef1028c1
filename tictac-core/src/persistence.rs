use crate::Result;

/// Durable key-value storage for persisted game state.
///
/// Backends store raw bytes under string keys; encoding is the job of the
/// [`Codec`](crate::serialization::Codec) layered on top. All operations are
/// synchronous and expected to be local, bounded-latency calls.
pub trait StorageBackend: Send + Sync {
    /// Read the bytes stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(bytes))` if an entry exists
    /// * `Ok(None)` if no entry exists
    /// * `Err(TicTacError)` if the backend could not be read
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous entry.
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the entry under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Whether an entry exists under `key`.
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.read(key)?.is_some())
    }
}
