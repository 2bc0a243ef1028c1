//! # Tictac Persistence
//!
//! Storage backends and the typed persistent store for the tictac engine.
//!
//! ## Backends
//!
//! - [`InMemoryStorage`] - Entries kept in memory (testing/non-persistent)
//! - [`FileSystemStorage`] - One file per key (persistent across restarts)
//!
//! ## Store
//!
//! - [`PersistentStore`] - Typed `load` / `save` / `rekey` over any backend,
//!   with a pluggable [`Codec`](tictac_core::Codec). Corrupt entries are
//!   deleted on load and replaced by the caller's default.
//! - [`PersistedValue`] - A single value bound to a key and written through
//!   on every change.
//!
//! ## Example
//!
//! ```rust
//! use tictac_persistence::{InMemoryStorage, PersistentStore};
//! use tictac_core::StorageBackend;
//!
//! let storage = InMemoryStorage::new();
//! let store = PersistentStore::new(storage.clone());
//!
//! store.save("step", &3usize).unwrap();
//! assert_eq!(store.load("step", 0usize), 3);
//!
//! // A corrupt entry is dropped and the default comes back
//! storage.write("step", b"not a number").unwrap();
//! assert_eq!(store.load("step", 0usize), 0);
//! assert!(!storage.contains("step").unwrap());
//! ```

pub mod file_system;
pub mod in_memory;
pub mod persisted;
pub mod store;
mod tests;

pub use file_system::FileSystemStorage;
pub use in_memory::InMemoryStorage;
pub use persisted::PersistedValue;
pub use store::PersistentStore;
