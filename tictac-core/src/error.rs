//! # Error Types
//!
//! Error handling for the tictac game engine and its storage layer.

use thiserror::Error;

/// Error types that can occur while playing, validating or persisting a game.
///
/// Rejected moves (an occupied square, or a board that already has a winner)
/// are *not* represented here: they are an ordinary part of play and are
/// reported as a `false` return from the move operation instead.
///
/// # Error Categories
///
/// - **Input Errors**: square indices or history steps outside their range
/// - **Persistence Errors**: storage backend read/write failures
/// - **Integrity Errors**: persisted histories that break the game invariants
///
/// # Examples
///
/// ```rust
/// use tictac_core::TicTacError;
///
/// let error = TicTacError::persistence("Disk full");
/// assert!(error.is_retryable());
///
/// let error = TicTacError::InvalidSquare { index: 12 };
/// assert!(!error.is_retryable());
/// ```
#[derive(Error, Debug)]
pub enum TicTacError {
    /// Square index outside the 3x3 board
    #[error("Invalid square index {index}: expected 0..=8")]
    InvalidSquare { index: usize },

    /// History step outside the recorded history
    #[error("Step {step} out of range: history has {len} snapshots")]
    StepOutOfRange { step: usize, len: usize },

    /// Storage backend operation failure
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Value could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A history that violates the ply invariants
    #[error("State corruption detected: {details}")]
    StateCorruption { details: String },

    /// File system I/O failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Results in the tictac engine.
pub type Result<T> = std::result::Result<T, TicTacError>;

impl TicTacError {
    /// Creates a new persistence error with the given message.
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }

    /// Creates a new serialization error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tictac_core::TicTacError;
    ///
    /// let error = TicTacError::serialization("Invalid JSON");
    /// assert_eq!(error.to_string(), "Serialization error: Invalid JSON");
    /// ```
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a new state corruption error with the given details.
    pub fn corruption(details: impl Into<String>) -> Self {
        Self::StateCorruption {
            details: details.into(),
        }
    }

    /// Creates a new internal error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Determines if retrying the same operation later might succeed.
    ///
    /// Storage failures are transient from the engine's point of view: the
    /// next committed change writes the full state again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence { .. } | Self::Io(_))
    }
}
