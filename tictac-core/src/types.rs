//! # Core Types
//!
//! Fundamental types shared by the rules, the history manager and the
//! storage layer.

use crate::{Result, TicTacError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

/// Number of cells on the board.
pub const BOARD_SIZE: usize = 9;

/// Number of cells per row (and per column).
pub const BOARD_WIDTH: usize = 3;

/// A player's symbol.
///
/// `X` always moves first. Serialized as the plain string tokens `"X"` and
/// `"O"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The mark of the other player.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single board cell: a mark, or `None` when empty.
///
/// Empty cells serialize as `null`.
pub type Cell = Option<Mark>;

/// Index of a square on the board, guaranteed to be in `0..=8`.
///
/// Squares are laid out row-major:
///
/// ```text
/// 0 | 1 | 2
/// 3 | 4 | 5
/// 6 | 7 | 8
/// ```
///
/// # Examples
///
/// ```rust
/// use tictac_core::Square;
///
/// let centre = Square::new(4).unwrap();
/// assert_eq!(centre.row(), 1);
/// assert_eq!(centre.column(), 1);
/// assert!(Square::new(9).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Square(pub(crate) u8);

impl Square {
    /// Creates a square from a board index, rejecting anything past 8.
    pub fn new(index: usize) -> Result<Self> {
        if index < BOARD_SIZE {
            Ok(Self(index as u8))
        } else {
            Err(TicTacError::InvalidSquare { index })
        }
    }

    /// Creates a square from its row and column (both `0..=2`).
    pub fn at(row: usize, column: usize) -> Result<Self> {
        if row >= BOARD_WIDTH || column >= BOARD_WIDTH {
            return Err(TicTacError::InvalidSquare {
                index: row * BOARD_WIDTH + column,
            });
        }
        Self::new(row * BOARD_WIDTH + column)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn row(self) -> usize {
        self.index() / BOARD_WIDTH
    }

    pub fn column(self) -> usize {
        self.index() % BOARD_WIDTH
    }

    /// All nine squares in board order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).map(Square)
    }
}

impl TryFrom<usize> for Square {
    type Error = TicTacError;

    fn try_from(index: usize) -> Result<Self> {
        Self::new(index)
    }
}

impl From<Square> for usize {
    fn from(square: Square) -> Self {
        square.index()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 3x3 board snapshot.
///
/// The length is fixed at nine by the type, so a decoded board can never be
/// short or long. Serialized as a plain array of nine cells, e.g.
/// `["X",null,null,null,"O",null,null,null,null]`.
///
/// Boards are immutable values in the history: a move produces a new board
/// via [`Board::with_mark`] rather than changing an existing snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([Cell; BOARD_SIZE]);

impl Board {
    /// The all-empty start board.
    pub fn empty() -> Self {
        Self([None; BOARD_SIZE])
    }

    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self(cells)
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.0
    }

    pub fn get(&self, square: Square) -> Cell {
        self.0[square.index()]
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    /// Returns a copy of this board with `mark` placed on `square`.
    pub fn with_mark(&self, square: Square, mark: Mark) -> Self {
        let mut cells = self.0;
        cells[square.index()] = Some(mark);
        Self(cells)
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.0.iter().filter(|cell| **cell == Some(mark)).count()
    }

    /// Number of marked cells of either kind.
    pub fn marked(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }

    /// Empty squares in board order.
    pub fn empty_squares(&self) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |square| !self.is_occupied(*square))
    }
}

impl Index<Square> for Board {
    type Output = Cell;

    fn index(&self, square: Square) -> &Self::Output {
        &self.0[square.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.0.chunks(BOARD_WIDTH).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for (column, cell) in cells.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(mark) => write!(f, "{}", mark)?,
                    None => f.write_str(".")?,
                }
            }
        }
        Ok(())
    }
}

/// Ordered board snapshots, one per ply; element 0 is always the empty board.
pub type History = Vec<Board>;

/// The single-snapshot history every game starts from.
pub fn initial_history() -> History {
    vec![Board::empty()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0).is_ok());
        assert!(Square::new(8).is_ok());
        assert!(matches!(
            Square::new(9),
            Err(TicTacError::InvalidSquare { index: 9 })
        ));
        assert!(Square::at(2, 3).is_err());
        assert_eq!(Square::at(2, 1).unwrap().index(), 7);
        assert_eq!(Square::all().count(), BOARD_SIZE);
    }

    #[test]
    fn test_board_with_mark_leaves_original_untouched() {
        let board = Board::empty();
        let square = Square::new(4).unwrap();
        let next = board.with_mark(square, Mark::X);

        assert!(board.is_empty());
        assert_eq!(next[square], Some(Mark::X));
        assert_eq!(next.marked(), 1);
        assert_eq!(next.count(Mark::X), 1);
        assert_eq!(next.count(Mark::O), 0);
        assert_eq!(next.empty_squares().count(), 8);
    }

    #[test]
    fn test_board_json_shape() {
        let board = Board::empty()
            .with_mark(Square::new(0).unwrap(), Mark::X)
            .with_mark(Square::new(4).unwrap(), Mark::O);

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, r#"["X",null,null,null,"O",null,null,null,null]"#);

        let decoded: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, board);
    }

    #[test]
    fn test_board_rejects_wrong_length() {
        assert!(serde_json::from_str::<Board>("[null,null,null]").is_err());
        assert!(serde_json::from_str::<Board>(r#"["X","Y",null,null,null,null,null,null,null]"#).is_err());
    }

    #[test]
    fn test_board_display() {
        let board = Board::empty()
            .with_mark(Square::new(0).unwrap(), Mark::X)
            .with_mark(Square::new(8).unwrap(), Mark::O);
        assert_eq!(board.to_string(), "X . .\n. . .\n. . O");
    }
}
