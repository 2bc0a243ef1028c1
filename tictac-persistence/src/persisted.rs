use crate::PersistentStore;
use serde::{de::DeserializeOwned, Serialize};
use tictac_core::{Codec, JsonCodec, Result, StorageBackend};
use tracing::warn;

/// A value bound to a storage key and written through on every change.
///
/// The in-memory value is the source of truth. It is loaded once on
/// [`open`](Self::open), written back immediately, and written again after
/// every [`set`](Self::set) or [`update`](Self::update). Changing the key
/// with [`set_key`](Self::set_key) moves the entry: the old key is removed and
/// the current value is written under the new one.
///
/// Write failures are logged and remembered; the next change retries.
///
/// # Examples
///
/// ```rust
/// use tictac_persistence::{InMemoryStorage, PersistedValue, PersistentStore};
///
/// let storage = InMemoryStorage::new();
/// let store = PersistentStore::new(storage.clone());
///
/// let mut name = PersistedValue::open(store.clone(), "name", String::new).unwrap();
/// name.set("Ada".to_string());
///
/// let reopened = PersistedValue::open(store, "name", String::new).unwrap();
/// assert_eq!(reopened.get(), "Ada");
/// ```
#[derive(Debug)]
pub struct PersistedValue<T, B, C = JsonCodec> {
    store: PersistentStore<B, C>,
    key: String,
    value: T,
    dirty: bool,
}

impl<T, B, C> PersistedValue<T, B, C>
where
    T: Serialize + DeserializeOwned,
    B: StorageBackend,
    C: Codec,
{
    /// Load the value under `key`, falling back to `default()` when the
    /// entry is absent or corrupt.
    ///
    /// # Errors
    /// * Returns the backend error if the entry could not be read; nothing
    ///   is written in that case
    pub fn open<F>(store: PersistentStore<B, C>, key: impl Into<String>, default: F) -> Result<Self>
    where
        F: FnOnce() -> T,
    {
        let key = key.into();
        let value = store.try_load(&key)?.unwrap_or_else(default);
        let mut persisted = Self {
            store,
            key,
            value,
            dirty: false,
        };
        persisted.write_through();
        Ok(persisted)
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the value and write it through.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write_through();
    }

    /// Modify the value in place and write it through.
    pub fn update<F>(&mut self, f: F)
    where
        F: FnOnce(&mut T),
    {
        f(&mut self.value);
        self.write_through();
    }

    /// Bind the value to a new key, removing the entry under the old one.
    pub fn set_key(&mut self, key: impl Into<String>) -> Result<()> {
        let key = key.into();
        if key == self.key {
            return Ok(());
        }
        self.store.rekey(&self.key, &key, &self.value)?;
        self.key = key;
        self.dirty = false;
        Ok(())
    }

    /// Retry a failed write.
    pub fn flush(&mut self) -> Result<()> {
        self.store.save(&self.key, &self.value)?;
        self.dirty = false;
        Ok(())
    }

    /// True when the last write failed and has not been retried successfully.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    fn write_through(&mut self) {
        match self.store.save(&self.key, &self.value) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                warn!("Failed to persist key={}: {}", self.key, e);
                self.dirty = true;
            }
        }
    }
}
