//! Turn-alternating game record for tic-tac-toe.

use super::rules::{check_winner, is_full};
use super::types::{Board, GameStatus, Side};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Errors that can occur when making a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The game has already ended.
    #[display("Game is already over")]
    GameOver,
    /// Index outside 0-8.
    #[display("Position {_0} out of bounds (must be 0-8)")]
    OutOfBounds(#[error(not(source))] usize),
    /// Square is already occupied.
    #[display("Square {_0} is already occupied")]
    Occupied(#[error(not(source))] usize),
}

/// Tic-tac-toe game: board, side to move, status and history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Side,
    status: GameStatus,
    history: Vec<usize>,
}

impl Game {
    /// Creates a new game with `first` to move.
    #[instrument]
    pub fn new(first: Side) -> Self {
        Self {
            board: Board::new(),
            to_move: first,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Side {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true while moves can still be made.
    pub fn is_in_progress(&self) -> bool {
        self.status == GameStatus::InProgress
    }

    /// Returns the move history (positions played).
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Makes a move for the side to move at the given position (0-8).
    #[instrument(skip(self), fields(side = %self.to_move))]
    pub fn make_move(&mut self, pos: usize) -> Result<(), MoveError> {
        if !self.is_in_progress() {
            return Err(MoveError::GameOver);
        }
        if pos >= 9 {
            return Err(MoveError::OutOfBounds(pos));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::Occupied(pos));
        }

        self.board = self.board.with_move(pos, self.to_move);
        self.history.push(pos);
        self.to_move = self.to_move.opponent();
        self.update_status();

        debug!(pos, status = ?self.status, "Move applied");
        Ok(())
    }

    /// Updates game status after a move.
    fn update_status(&mut self) {
        if let Some(winner) = check_winner(&self.board) {
            self.status = GameStatus::Won(winner);
        } else if is_full(&self.board) {
            self.status = GameStatus::Draw;
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Side::X)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_alternate() {
        let mut game = Game::default();
        game.make_move(4).unwrap();
        assert_eq!(game.to_move(), Side::O);
        game.make_move(0).unwrap();
        assert_eq!(game.to_move(), Side::X);
        assert_eq!(game.history(), &[4, 0]);
    }

    #[test]
    fn test_rejects_occupied_and_out_of_bounds() {
        let mut game = Game::default();
        game.make_move(4).unwrap();
        assert_eq!(game.make_move(4), Err(MoveError::Occupied(4)));
        assert_eq!(game.make_move(9), Err(MoveError::OutOfBounds(9)));
        assert_eq!(game.to_move(), Side::O);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = Game::default();
        for pos in [0, 3, 1, 4, 2] {
            game.make_move(pos).unwrap();
        }
        match game.status() {
            GameStatus::Won(w) => {
                assert_eq!(w.side, Side::X);
                assert_eq!(w.line, [0, 1, 2]);
            }
            other => panic!("expected win, got {other:?}"),
        }
        assert_eq!(game.make_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_draw() {
        let mut game = Game::default();
        // X O X / X O O / O X X
        for pos in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.make_move(pos).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Draw);
    }
}
