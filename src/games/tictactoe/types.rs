//! Core domain types for tic-tac-toe.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// One of the two markers on the board.
///
/// The engine is always asked for the best move of a given side, so nothing
/// in the move logic depends on which literal marker that side is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Side {
    /// Side X.
    X,
    /// Side O.
    O,
}

impl Side {
    /// Returns the other side.
    pub fn opponent(self) -> Self {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a side.
    Occupied(Side),
}

/// 3x3 tic-tac-toe board.
///
/// Squares are stored row-major: index `i` is row `i / 3`, column `i % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty. Out-of-bounds positions are never empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Returns true if the square holds `side`.
    pub fn is_occupied_by(&self, pos: usize, side: Side) -> bool {
        self.get(pos) == Some(Square::Occupied(side))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns a copy of this board with `side` placed at `pos`.
    ///
    /// The receiver is left untouched. Out-of-bounds positions yield an
    /// unchanged copy.
    pub fn with_move(&self, pos: usize, side: Side) -> Self {
        let mut next = *self;
        if let Some(slot) = next.squares.get_mut(pos) {
            *slot = Square::Occupied(side);
        }
        next
    }

    /// Returns a copy with every X turned into O and every O into X.
    ///
    /// Empty squares and positions are unchanged, so an index chosen on the
    /// relabeled board is valid on the original.
    #[instrument(skip(self))]
    pub fn relabeled(&self) -> Self {
        let mut squares = self.squares;
        for square in squares.iter_mut() {
            if let Square::Occupied(side) = *square {
                *square = Square::Occupied(side.opponent());
            }
        }
        Self { squares }
    }

    /// Counts squares held by `side`.
    pub fn count(&self, side: Side) -> usize {
        self.squares
            .iter()
            .filter(|&&s| s == Square::Occupied(side))
            .count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number so a player can type it.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(side) => side.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }

    /// Renders the board as a JSON array of `"X"`, `"O"` and `null`.
    pub fn to_json_cells(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.squares
                .iter()
                .map(|square| match square {
                    Square::Empty => serde_json::Value::Null,
                    Square::Occupied(side) => serde_json::Value::String(side.to_string()),
                })
                .collect(),
        )
    }

    /// Compact 9-character form, `.` for empty squares.
    pub fn to_compact(&self) -> String {
        self.squares
            .iter()
            .map(|square| match square {
                Square::Empty => '.',
                Square::Occupied(Side::X) => 'X',
                Square::Occupied(Side::O) => 'O',
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_compact())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character that is neither a mark nor an empty marker.
    #[display("unexpected character {_0:?} in board")]
    UnexpectedChar(#[error(not(source))] char),
    /// Wrong number of cells.
    #[display("board must have 9 cells, found {_0}")]
    WrongLength(#[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `X`, `O` (any case) and `.`, `-`, `_` for empty squares.
    /// Whitespace, `|` and `/` are separators and ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars() {
            let square = match c {
                'x' | 'X' => Square::Occupied(Side::X),
                'o' | 'O' => Square::Occupied(Side::O),
                '.' | '-' | '_' => Square::Empty,
                '|' | '/' => continue,
                c if c.is_whitespace() => continue,
                other => return Err(BoardParseError::UnexpectedChar(other)),
            };
            squares.push(square);
        }
        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

/// A completed line: the side that owns it and its three indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    /// The winning side.
    pub side: Side,
    /// Indices of the completed line, in table order.
    pub line: [usize; 3],
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Winner),
    /// Game ended in a draw.
    Draw,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_compact_agree() {
        let board: Board = "XO. / .X. / ..O".parse().unwrap();
        assert_eq!(board.to_compact(), "XO..X...O");
        assert_eq!(board.count(Side::X), 2);
        assert_eq!(board.count(Side::O), 2);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "XO?......".parse::<Board>(),
            Err(BoardParseError::UnexpectedChar('?'))
        );
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength(2))
        );
    }

    #[test]
    fn test_relabel_swaps_marks_only() {
        let board: Board = "XO.X.O...".parse().unwrap();
        let swapped = board.relabeled();
        assert_eq!(swapped.to_compact(), "OX.O.X...");
        assert_eq!(swapped.relabeled(), board);
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::new();
        let next = board.with_move(4, Side::X);
        assert!(board.is_empty(4));
        assert!(next.is_occupied_by(4, Side::X));
    }

    #[test]
    fn test_json_cells() {
        let board: Board = "X...O....".parse().unwrap();
        let json = board.to_json_cells();
        assert_eq!(json[0], "X");
        assert_eq!(json[4], "O");
        assert!(json[1].is_null());
    }

    #[test]
    fn test_side_parses_case_insensitive() {
        assert_eq!("x".parse::<Side>().unwrap(), Side::X);
        assert_eq!("O".parse::<Side>().unwrap(), Side::O);
    }
}
