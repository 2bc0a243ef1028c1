//! # Tictac Engine
//!
//! Move history with time travel, persisted after every change.
//!
//! The game state is exactly a sequence of board snapshots plus a cursor into
//! it. Three operations change it: playing a square, jumping to an earlier
//! (or later) snapshot, and restarting. Playing from a snapshot before the
//! latest one discards the abandoned future first, so the history stays a
//! single line rather than a tree.
//!
//! ## Key Components
//!
//! - **GameHistory**: the pure (history, cursor) state and its transitions
//! - **HistoryManager**: wraps a `GameHistory` and writes it through a
//!   `PersistentStore` after every change
//! - **GameConfig**: storage layout and load-time validation settings
//!
//! ## Example Usage
//!
//! ```rust
//! use tictac_engine::{GameConfig, HistoryManager};
//! use tictac_core::{Mark, Square};
//! use tictac_persistence::{InMemoryStorage, PersistentStore};
//!
//! let store = PersistentStore::new(InMemoryStorage::new());
//! let mut game = HistoryManager::open(GameConfig::default(), store).unwrap();
//!
//! for index in [0, 3, 1, 4, 2] {
//!     game.select_square(Square::new(index).unwrap());
//! }
//! assert_eq!(game.winner(), Some(Mark::X));
//!
//! // Go back two plies and take a different line
//! game.jump_to(3).unwrap();
//! assert!(game.select_square(Square::new(8).unwrap()));
//! assert_eq!(game.history().len(), 5);
//! ```

pub mod config;
pub mod history;
pub mod manager;

pub use config::{GameConfig, StorageLayout};
pub use history::{GameHistory, MoveEntry};
pub use manager::HistoryManager;
