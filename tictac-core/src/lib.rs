//! # Tictac Core - Rules, Types and Storage Traits
//!
//! Core components for the tictac time-travel game engine.
//!
//! This crate has no I/O of its own. It provides:
//!
//! ## Components
//!
//! - **Types**: [`Mark`], [`Cell`], [`Board`], [`Square`] and the [`History`] alias
//! - **Rules**: pure functions deriving the next mover, the winner and the
//!   status line from a board ([`rules`])
//! - **Validation**: checks that a history could have come from legal play
//! - **Serialization**: the [`Codec`] strategy used by the persistent store
//! - **Persistence**: the [`StorageBackend`] trait implemented by the
//!   `tictac-persistence` crate
//! - **Error Handling**: [`TicTacError`] and the crate [`Result`] alias
//!
//! ## Example
//!
//! ```rust
//! use tictac_core::{rules, Board, GameStatus, Mark, Square};
//!
//! let mut board = Board::empty();
//! for index in [0, 3, 1, 4, 2] {
//!     let square = Square::new(index).unwrap();
//!     board = board.with_mark(square, rules::next_mover(&board));
//! }
//!
//! assert_eq!(rules::winner(&board), Some(Mark::X));
//! assert_eq!(rules::status(&board), GameStatus::Won(Mark::X));
//! assert_eq!(rules::status(&board).to_string(), "Winner: X");
//! ```

pub mod error;
pub mod persistence;
pub mod rules;
pub mod serialization;
pub mod types;
pub mod validation;

// Re-export commonly used types for convenience
pub use error::*;
pub use persistence::StorageBackend;
pub use rules::GameStatus;
pub use serialization::{BinaryCodec, Codec, JsonCodec};
pub use types::*;
pub use validation::{validate_history, Validator};
