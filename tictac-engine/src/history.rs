use serde::{Deserialize, Serialize};
use tictac_core::{
    initial_history, rules, validate_history, Board, GameStatus, History, Mark, Result, Square,
    TicTacError,
};

/// Linear move history with a movable cursor.
///
/// This is the whole game state: a non-empty sequence of board snapshots (one
/// per ply, starting from the empty board) and the index of the snapshot
/// currently shown. Moving the cursor back never discards anything; making a
/// move from a non-tip cursor discards every snapshot after the cursor first.
///
/// `GameHistory` knows nothing about storage. [`HistoryManager`] wraps it and
/// writes it through after each change.
///
/// [`HistoryManager`]: crate::HistoryManager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredGame")]
pub struct GameHistory {
    history: History,
    cursor: usize,
}

/// Unchecked wire form of a [`GameHistory`]; decoding goes through
/// [`GameHistory::from_parts`].
#[derive(Debug, Deserialize)]
pub(crate) struct StoredGame {
    pub(crate) history: History,
    pub(crate) cursor: usize,
}

impl TryFrom<StoredGame> for GameHistory {
    type Error = TicTacError;

    fn try_from(stored: StoredGame) -> Result<Self> {
        Self::from_parts(stored.history, stored.cursor)
    }
}

/// One entry of the move list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveEntry {
    pub step: usize,
    pub description: String,
    pub is_current: bool,
}

impl GameHistory {
    /// A game at its start: one empty board, cursor 0.
    pub fn new() -> Self {
        Self {
            history: initial_history(),
            cursor: 0,
        }
    }

    /// Rebuild a game from stored parts.
    ///
    /// # Errors
    /// * `StateCorruption` if `history` is empty
    /// * `StepOutOfRange` if `cursor` is not an index into `history`
    pub fn from_parts(history: History, cursor: usize) -> Result<Self> {
        if history.is_empty() {
            return Err(TicTacError::corruption("history is empty"));
        }
        if cursor >= history.len() {
            return Err(TicTacError::StepOutOfRange {
                step: cursor,
                len: history.len(),
            });
        }
        Ok(Self { history, cursor })
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots, including the start board.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false; a history holds at least the start board.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// True when the cursor points at the latest snapshot.
    pub fn is_at_tip(&self) -> bool {
        self.cursor + 1 == self.history.len()
    }

    pub fn current_board(&self) -> &Board {
        &self.history[self.cursor]
    }

    pub fn next_mover(&self) -> Mark {
        rules::next_mover(self.current_board())
    }

    pub fn winner(&self) -> Option<Mark> {
        rules::winner(self.current_board())
    }

    pub fn status(&self) -> GameStatus {
        rules::status(self.current_board())
    }

    /// Place the next mover's mark on `square` of the current board.
    ///
    /// Returns `false` without changing anything when the current board
    /// already has a winner or the square is taken. Otherwise truncates the
    /// history after the cursor, appends the new board and moves the cursor
    /// to it.
    pub fn select_square(&mut self, square: Square) -> bool {
        let current = *self.current_board();
        if !rules::is_legal_move(&current, square) {
            return false;
        }

        let next = current.with_mark(square, rules::next_mover(&current));
        self.history.truncate(self.cursor + 1);
        self.history.push(next);
        self.cursor = self.history.len() - 1;
        true
    }

    /// Move the cursor to `step` without touching the history.
    ///
    /// Jumping to the current step is a valid call with no effect.
    pub fn jump_to(&mut self, step: usize) -> Result<()> {
        if step >= self.history.len() {
            return Err(TicTacError::StepOutOfRange {
                step,
                len: self.history.len(),
            });
        }
        self.cursor = step;
        Ok(())
    }

    /// Back to the single empty board.
    pub fn restart(&mut self) {
        self.history = initial_history();
        self.cursor = 0;
    }

    /// Check the history against the ply invariants.
    pub fn validate(&self) -> Result<()> {
        validate_history(&self.history)
    }

    /// One entry per snapshot, for a "go to move" list.
    ///
    /// ```rust
    /// use tictac_engine::GameHistory;
    /// use tictac_core::Square;
    ///
    /// let mut game = GameHistory::new();
    /// game.select_square(Square::new(4).unwrap());
    ///
    /// let labels: Vec<String> = game.moves().into_iter().map(|m| m.description).collect();
    /// assert_eq!(labels, ["Go to game start", "Go to move #1 (current)"]);
    /// ```
    pub fn moves(&self) -> Vec<MoveEntry> {
        (0..self.history.len())
            .map(|step| {
                let is_current = step == self.cursor;
                let mut description = if step == 0 {
                    "Go to game start".to_string()
                } else {
                    format!("Go to move #{}", step)
                };
                if is_current {
                    description.push_str(" (current)");
                }
                MoveEntry {
                    step,
                    description,
                    is_current,
                }
            })
            .collect()
    }
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}
