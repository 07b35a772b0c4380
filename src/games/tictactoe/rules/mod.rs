//! Game rules for tic-tac-toe.
//!
//! Pure functions for evaluating board state. Rules are kept apart from
//! board storage so the move engine can call them on hypothetical boards.

pub mod draw;
pub mod win;

pub use draw::{empty_cells, is_draw, is_full};
pub use win::{LINES, check_winner, winner_side};
