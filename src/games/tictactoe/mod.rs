//! Tic-tac-toe board model, rules and game record.

mod game;
mod position;
pub mod rules;
mod types;

pub use game::{Game, MoveError};
pub use position::{CENTER, CORNERS, EDGES, OPPOSITE_CORNERS, Position};
pub use types::{Board, BoardParseError, GameStatus, Side, Square, Winner};
