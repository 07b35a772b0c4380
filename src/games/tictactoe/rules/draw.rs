//! Draw detection and empty-square listing for tic-tac-toe.

use super::super::{Board, Square};
use super::win::check_winner;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
#[instrument(level = "trace")]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// A full board with no winner.
#[instrument(level = "trace")]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

/// Indices of empty squares in ascending order.
///
/// Callers rely on the ordering: "first winning square" means lowest index,
/// and seeded random picks index into this list.
#[instrument(level = "trace")]
pub fn empty_cells(board: &Board) -> Vec<usize> {
    board
        .squares()
        .iter()
        .enumerate()
        .filter(|(_, s)| **s == Square::Empty)
        .map(|(i, _)| i)
        .collect()
}
