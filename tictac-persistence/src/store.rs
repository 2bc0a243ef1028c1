use serde::{de::DeserializeOwned, Serialize};
use tictac_core::{Codec, JsonCodec, Result, StorageBackend};
use tracing::{debug, info, warn};

/// Typed key-value persistence over a [`StorageBackend`].
///
/// Values are encoded with the store's [`Codec`] (JSON by default). Loading is
/// self-healing: an entry that cannot be decoded is deleted and the caller's
/// default is returned instead, so corrupt data never reaches the caller.
#[derive(Debug, Clone)]
pub struct PersistentStore<B, C = JsonCodec> {
    backend: B,
    codec: C,
}

impl<B: StorageBackend> PersistentStore<B> {
    /// Create a store using the default JSON codec.
    pub fn new(backend: B) -> Self {
        Self::with_codec(backend, JsonCodec)
    }
}

impl<B, C> PersistentStore<B, C>
where
    B: StorageBackend,
    C: Codec,
{
    /// Create a store with an explicit codec.
    pub fn with_codec(backend: B, codec: C) -> Self {
        Self { backend, codec }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Load the value under `key`, or `default` if it is absent or corrupt.
    pub fn load<T>(&self, key: &str, default: T) -> T
    where
        T: DeserializeOwned,
    {
        self.load_or_else(key, || default)
    }

    /// Load the value under `key`, producing the default lazily.
    ///
    /// `default` is only called when the entry is absent or corrupt.
    pub fn load_or_else<T, F>(&self, key: &str, default: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        self.load_optional(key).unwrap_or_else(default)
    }

    /// Load the value under `key`.
    ///
    /// Returns `None` when there is no entry, when the entry could not be
    /// decoded (the entry is removed), or when the backend could not be read.
    /// Callers that must not mistake an unreadable entry for a missing one
    /// use [`try_load`](Self::try_load).
    pub fn load_optional<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.try_load(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read persisted entry key={}: {}", key, e);
                None
            }
        }
    }

    /// Load the value under `key`, reporting backend read failures.
    ///
    /// `Ok(None)` means the entry is absent or was corrupt (and has been
    /// removed). A failed read leaves the entry untouched.
    ///
    /// # Errors
    /// * Whatever the backend returned for the read
    pub fn try_load<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let bytes = match self.backend.read(key)? {
            Some(bytes) => bytes,
            None => {
                debug!("No persisted entry for key={}", key);
                return Ok(None);
            }
        };

        match self.codec.decode(&bytes) {
            Ok(value) => {
                debug!("Loaded key={}, bytes={}", key, bytes.len());
                Ok(Some(value))
            }
            Err(e) => {
                warn!("Discarding corrupt entry key={}: {}", key, e);
                self.discard(key);
                Ok(None)
            }
        }
    }

    /// Encode `value` and write it under `key`, replacing any previous entry.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let bytes = self.codec.encode(value)?;
        self.backend.write(key, &bytes)?;
        debug!("Saved key={}, bytes={}", key, bytes.len());
        Ok(())
    }

    /// Remove the entry under `key`.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(key)
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        self.backend.contains(key)
    }

    /// Move a value from `old_key` to `new_key`.
    ///
    /// `value` is written under `new_key` and the entry under `old_key` is
    /// removed. When the keys are equal this is a plain save.
    pub fn rekey<T>(&self, old_key: &str, new_key: &str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        self.save(new_key, value)?;
        if old_key != new_key {
            self.backend.remove(old_key)?;
            info!("Rekeyed persisted entry {} -> {}", old_key, new_key);
        }
        Ok(())
    }

    /// Removes a corrupt entry. A failure here only means the next load will
    /// discard it again.
    pub(crate) fn discard(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            warn!("Failed to remove corrupt entry key={}: {}", key, e);
        }
    }
}
