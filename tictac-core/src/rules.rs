//! # Game Rules
//!
//! Pure functions deriving everything about a position from the board alone.
//!
//! There is no stored "whose turn" field anywhere in the model: the next
//! mover is always recomputed from the mark counts, so it can never drift
//! out of sync with the board.

use crate::types::{Board, Mark, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight winning lines, checked in this order: rows, columns, diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the mark whose turn it is.
///
/// `X` when both players have placed the same number of marks (including an
/// empty board), otherwise `O`.
///
/// # Examples
///
/// ```rust
/// use tictac_core::{rules, Board, Mark, Square};
///
/// let board = Board::empty();
/// assert_eq!(rules::next_mover(&board), Mark::X);
///
/// let board = board.with_mark(Square::new(0).unwrap(), Mark::X);
/// assert_eq!(rules::next_mover(&board), Mark::O);
/// ```
pub fn next_mover(board: &Board) -> Mark {
    if board.count(Mark::X) == board.count(Mark::O) {
        Mark::X
    } else {
        Mark::O
    }
}

/// Returns the owner of the first complete line, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

/// Returns the owner and squares of the first complete line, if any.
pub fn winning_line(board: &Board) -> Option<(Mark, [Square; 3])> {
    let cells = board.cells();
    WINNING_LINES.iter().find_map(|&[a, b, c]| match cells[a] {
        Some(mark) if cells[b] == Some(mark) && cells[c] == Some(mark) => {
            let line = [Square(a as u8), Square(b as u8), Square(c as u8)];
            Some((mark, line))
        }
        _ => None,
    })
}

/// Derives the status of the position.
pub fn status(board: &Board) -> GameStatus {
    if let Some(mark) = winner(board) {
        GameStatus::Won(mark)
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress(next_mover(board))
    }
}

/// Whether a move on `square` would be accepted.
///
/// A move is rejected when the board already has a winner or the square is
/// occupied. Both cases are treated the same way by callers.
pub fn is_legal_move(board: &Board, square: Square) -> bool {
    winner(board).is_none() && !board.is_occupied(square)
}

/// Status of a position.
///
/// The `Display` impl produces the status line shown to players.
///
/// ```rust
/// use tictac_core::{GameStatus, Mark};
///
/// assert_eq!(GameStatus::Won(Mark::X).to_string(), "Winner: X");
/// assert_eq!(GameStatus::Draw.to_string(), "Scratch: Cat's game");
/// assert_eq!(GameStatus::InProgress(Mark::O).to_string(), "Next player: O");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// A line is complete
    Won(Mark),
    /// Every cell is filled and nobody completed a line
    Draw,
    /// The game continues with the given mover
    InProgress(Mark),
}

impl GameStatus {
    /// True once no further move can be applied until restart.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress(_))
    }

    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(*mark),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Won(mark) => write!(f, "Winner: {}", mark),
            GameStatus::Draw => f.write_str("Scratch: Cat's game"),
            GameStatus::InProgress(mark) => write!(f, "Next player: {}", mark),
        }
    }
}
