//! Win detection logic for tic-tac-toe.

use super::super::{Board, Side, Square, Winner};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if there is a winner on the board.
///
/// Lines are scanned in table order and the first complete line wins, so a
/// board with two complete lines (unreachable in legal play) still gets a
/// deterministic answer.
#[instrument(level = "trace")]
pub fn check_winner(board: &Board) -> Option<Winner> {
    LINES.iter().find_map(|&line| {
        let [a, b, c] = line;
        match board.get(a) {
            Some(Square::Occupied(side))
                if board.get(b) == Some(Square::Occupied(side))
                    && board.get(c) == Some(Square::Occupied(side)) =>
            {
                Some(Winner { side, line })
            }
            _ => None,
        }
    })
}

/// Shorthand for the winning side only.
pub fn winner_side(board: &Board) -> Option<Side> {
    check_winner(board).map(|w| w.side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_winner_top_row() {
        let winner = check_winner(&board("XXX.O.O..")).unwrap();
        assert_eq!(winner.side, Side::X);
        assert_eq!(winner.line, [0, 1, 2]);
    }

    #[test]
    fn test_winner_column() {
        let winner = check_winner(&board(".O.XO.XO.")).unwrap();
        assert_eq!(winner.side, Side::O);
        assert_eq!(winner.line, [1, 4, 7]);
    }

    #[test]
    fn test_winner_diagonal() {
        let winner = check_winner(&board("..O.O.OXX")).unwrap();
        assert_eq!(winner.side, Side::O);
        assert_eq!(winner.line, [2, 4, 6]);
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(check_winner(&board("XX.......")), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        assert_eq!(check_winner(&board("XOX......")), None);
    }

    #[test]
    fn test_first_line_in_table_order_wins() {
        // Both the top row (X) and bottom row (O) are complete.
        let winner = check_winner(&board("XXX...OOO")).unwrap();
        assert_eq!(winner.side, Side::X);
        assert_eq!(winner.line, [0, 1, 2]);
    }
}
