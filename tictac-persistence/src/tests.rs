#[cfg(test)]
mod unit_tests {
    use crate::{FileSystemStorage, InMemoryStorage, PersistedValue, PersistentStore};
    use proptest::prelude::*;
    use std::cell::Cell as Counter;
    use tictac_core::{
        initial_history, BinaryCodec, Board, History, Mark, Result, Square, StorageBackend,
        TicTacError,
    };

    fn history_with_moves(indices: &[usize]) -> History {
        let mut history = initial_history();
        for &index in indices {
            let board = *history.last().unwrap();
            let mark = tictac_core::rules::next_mover(&board);
            history.push(board.with_mark(Square::new(index).unwrap(), mark));
        }
        history
    }

    /// Backend whose writes always fail.
    struct ReadOnlyStorage;

    impl StorageBackend for ReadOnlyStorage {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Ok(None)
        }

        fn write(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(TicTacError::persistence("storage is read-only"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Ok(())
        }
    }

    /// Backend whose reads always fail; writes reach `inner`.
    struct UnreadableStorage {
        inner: InMemoryStorage,
    }

    impl StorageBackend for UnreadableStorage {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(TicTacError::persistence("device not ready"))
        }

        fn write(&self, key: &str, value: &[u8]) -> Result<()> {
            self.inner.write(key, value)
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_in_memory_storage() {
        let storage = InMemoryStorage::new();

        // Initially should return None
        assert!(storage.read("key").unwrap().is_none());

        storage.write("key", b"hello world").unwrap();
        assert_eq!(storage.read("key").unwrap(), Some(b"hello world".to_vec()));

        // Overwrite with new data
        storage.write("key", b"goodbye world").unwrap();
        assert_eq!(storage.read("key").unwrap(), Some(b"goodbye world".to_vec()));

        storage.remove("key").unwrap();
        assert!(storage.is_empty());

        // Removing twice is fine
        storage.remove("key").unwrap();
    }

    #[test]
    fn test_file_system_storage_survives_reopen() {
        use tempfile::TempDir;

        let temp_dir = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

        assert!(storage.read("tic-tac-toe:history").unwrap().is_none());

        storage.write("tic-tac-toe:history", b"[]").unwrap();
        assert!(storage.contains("tic-tac-toe:history").unwrap());

        // Create a new instance with the same directory
        let storage2 = FileSystemStorage::new(temp_dir.path()).unwrap();
        assert_eq!(
            storage2.read("tic-tac-toe:history").unwrap(),
            Some(b"[]".to_vec())
        );

        storage2.remove("tic-tac-toe:history").unwrap();
        assert!(!storage.contains("tic-tac-toe:history").unwrap());
        assert!(!storage2.entry_path("tic-tac-toe:history").exists());
    }

    #[test]
    fn test_file_system_storage_creates_nested_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let storage = FileSystemStorage::new(&nested).unwrap();

        storage.write("squares", b"x").unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.data_dir(), nested.as_path());
    }

    #[test]
    fn test_store_round_trip() {
        let store = PersistentStore::new(InMemoryStorage::new());
        let history = history_with_moves(&[4, 0, 8]);

        store.save("history", &history).unwrap();
        store.save("step", &2usize).unwrap();

        assert_eq!(store.load("history", initial_history()), history);
        assert_eq!(store.load("step", 0usize), 2);
    }

    #[test]
    fn test_store_absent_key_returns_default() {
        let store = PersistentStore::new(InMemoryStorage::new());
        assert_eq!(store.load("missing", 7usize), 7);
        assert_eq!(store.load_optional::<usize>("missing"), None);
    }

    #[test]
    fn test_store_lazy_default_only_when_needed() {
        let store = PersistentStore::new(InMemoryStorage::new());
        let calls = Counter::new(0);
        let make_default = || {
            calls.set(calls.get() + 1);
            initial_history()
        };

        store.save("history", &history_with_moves(&[0])).unwrap();
        let loaded = store.load_or_else("history", make_default);
        assert_eq!(loaded.len(), 2);
        assert_eq!(calls.get(), 0);

        let fallback = store.load_or_else("other", || {
            calls.set(calls.get() + 1);
            initial_history()
        });
        assert_eq!(fallback, initial_history());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_store_corruption_recovery() {
        let storage = InMemoryStorage::new();
        let store = PersistentStore::new(storage.clone());

        storage.write("history", b"[[\"X\",null]").unwrap();
        assert_eq!(store.load("history", initial_history()), initial_history());

        // The corrupt entry is gone, not just skipped
        assert!(!storage.contains("history").unwrap());
        assert_eq!(store.load_optional::<History>("history"), None);
    }

    #[test]
    fn test_store_corruption_recovery_on_disk() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp_dir.path()).unwrap();
        let store = PersistentStore::new(storage.clone());

        std::fs::write(storage.entry_path("step"), b"{{{").unwrap();
        assert_eq!(store.load("step", 0usize), 0);
        assert!(!storage.entry_path("step").exists());
    }

    #[test]
    fn test_store_read_failure_is_not_absence() {
        let inner = InMemoryStorage::new();
        PersistentStore::new(inner.clone())
            .save("step", &5usize)
            .unwrap();
        let store = PersistentStore::new(UnreadableStorage {
            inner: inner.clone(),
        });

        assert!(store.try_load::<usize>("step").is_err());
        assert_eq!(store.load("step", 0usize), 0);

        // The unreadable entry is left alone
        assert_eq!(inner.read("step").unwrap(), Some(b"5".to_vec()));
    }

    #[test]
    fn test_store_wrong_shape_is_corrupt() {
        let storage = InMemoryStorage::new();
        let store = PersistentStore::new(storage.clone());

        // Valid JSON, but a board needs exactly nine cells
        storage.write("board", b"[null,null,null]").unwrap();
        assert_eq!(store.load("board", Board::empty()), Board::empty());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_store_binary_codec() {
        let storage = InMemoryStorage::new();
        let store = PersistentStore::with_codec(storage.clone(), BinaryCodec);
        let history = history_with_moves(&[0, 1, 2]);

        store.save("history", &history).unwrap();
        assert_eq!(store.load("history", initial_history()), history);

        // JSON text is not valid bincode for this shape
        storage.write("history", b"[[null]]").unwrap();
        assert_eq!(store.load("history", initial_history()), initial_history());
    }

    #[test]
    fn test_store_rekey() {
        let storage = InMemoryStorage::new();
        let store = PersistentStore::new(storage.clone());
        let history = history_with_moves(&[4]);

        store.save("game-a", &history).unwrap();
        store.rekey("game-a", "game-b", &history).unwrap();

        assert_eq!(storage.keys(), vec!["game-b".to_string()]);
        assert_eq!(store.load("game-b", initial_history()), history);

        // Same key degenerates to a save
        store.rekey("game-b", "game-b", &initial_history()).unwrap();
        assert_eq!(store.load("game-b", history), initial_history());
    }

    #[test]
    fn test_persisted_value_writes_on_open_and_set() {
        let storage = InMemoryStorage::new();
        let store = PersistentStore::new(storage.clone());

        let mut squares = PersistedValue::open(store.clone(), "squares", Board::empty).unwrap();
        assert!(storage.contains("squares").unwrap());

        let board = Board::empty().with_mark(Square::new(0).unwrap(), Mark::X);
        squares.set(board);

        let reopened = PersistedValue::open(store, "squares", Board::empty).unwrap();
        assert_eq!(*reopened.get(), board);
    }

    #[test]
    fn test_persisted_value_open_does_not_overwrite_unreadable_entry() {
        let inner = InMemoryStorage::new();
        let board = Board::empty().with_mark(Square::new(4).unwrap(), Mark::X);
        PersistentStore::new(inner.clone())
            .save("squares", &board)
            .unwrap();

        let store = PersistentStore::new(UnreadableStorage {
            inner: inner.clone(),
        });
        assert!(PersistedValue::open(store, "squares", Board::empty).is_err());

        let reopened = PersistedValue::open(PersistentStore::new(inner), "squares", Board::empty).unwrap();
        assert_eq!(*reopened.get(), board);
    }

    #[test]
    fn test_persisted_value_update_and_set_key() {
        let storage = InMemoryStorage::new();
        let store = PersistentStore::new(storage.clone());

        let mut name = PersistedValue::open(store.clone(), "name", String::new).unwrap();
        name.update(|value| value.push_str("Grace"));
        name.set_key("greeting:name").unwrap();

        assert_eq!(name.key(), "greeting:name");
        assert_eq!(storage.keys(), vec!["greeting:name".to_string()]);
        assert_eq!(store.load("greeting:name", String::new()), "Grace");
        assert_eq!(name.into_inner(), "Grace");
    }

    #[test]
    fn test_persisted_value_failed_write_keeps_value() {
        let store = PersistentStore::new(ReadOnlyStorage);
        let mut step = PersistedValue::open(store, "step", || 0usize).unwrap();
        assert!(step.is_dirty());

        step.set(3);
        assert_eq!(*step.get(), 3);
        assert!(step.is_dirty());
        assert!(step.flush().is_err());
    }

    proptest! {
        #[test]
        fn test_file_keys_never_collide(
            first in "[a-z:%./_-]{1,12}",
            second in "[a-z:%./_-]{1,12}",
        ) {
            prop_assume!(first != second);
            let temp_dir = tempfile::TempDir::new().unwrap();
            let store = PersistentStore::new(FileSystemStorage::new(temp_dir.path()).unwrap());

            store.save(&first, &1usize).unwrap();
            store.save(&second, &2usize).unwrap();

            prop_assert_eq!(store.load(&first, 0usize), 1);
            prop_assert_eq!(store.load(&second, 0usize), 2);
        }
    }
}
