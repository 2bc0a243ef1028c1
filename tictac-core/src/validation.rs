use crate::rules::{next_mover, winner};
use crate::{Board, Result, TicTacError, BOARD_SIZE};

pub trait Validator {
    fn validate(&self) -> Result<()>;
}

impl Validator for [Board] {
    fn validate(&self) -> Result<()> {
        validate_history(self)
    }
}

impl Validator for Vec<Board> {
    fn validate(&self) -> Result<()> {
        validate_history(self)
    }
}

/// Checks that `history` could have been produced by legal play.
///
/// - it is non-empty and starts from the empty board
/// - every later snapshot adds exactly one mark to an empty cell
/// - that mark belongs to the mover of the previous snapshot
/// - no snapshot follows a won position
pub fn validate_history(history: &[Board]) -> Result<()> {
    let first = history
        .first()
        .ok_or_else(|| TicTacError::corruption("history is empty"))?;

    if !first.is_empty() {
        return Err(TicTacError::corruption(
            "history does not start from the empty board",
        ));
    }

    for (ply, pair) in history.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        validate_ply(previous, current).map_err(|details| {
            TicTacError::corruption(format!("ply {}: {}", ply + 1, details))
        })?;
    }

    Ok(())
}

fn validate_ply(previous: &Board, current: &Board) -> std::result::Result<(), String> {
    if let Some(mark) = winner(previous) {
        return Err(format!("move made after {} already won", mark));
    }

    let changed: Vec<usize> = (0..BOARD_SIZE)
        .filter(|&i| previous.cells()[i] != current.cells()[i])
        .collect();

    let index = match changed.as_slice() {
        [index] => *index,
        _ => return Err(format!("{} cells changed, expected 1", changed.len())),
    };

    let expected = next_mover(previous);
    match (previous.cells()[index], current.cells()[index]) {
        (None, Some(mark)) if mark == expected => Ok(()),
        (None, Some(mark)) => Err(format!(
            "square {} marked {} but it was {}'s turn",
            index, mark, expected
        )),
        _ => Err(format!("square {} was overwritten or cleared", index)),
    }
}
