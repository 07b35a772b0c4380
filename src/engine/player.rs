//! The heuristic player: runs a skill profile's cascade against a board.

use super::cascade::Choice;
use super::error::EngineError;
use super::skill::SkillProfile;
use crate::games::tictactoe::Board;
use crate::games::tictactoe::Side;
use crate::games::tictactoe::rules::empty_cells;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Runs the cascade for `skill` and returns the deciding rule's name and
/// choice.
///
/// Fails only when the board has no empty square.
#[instrument(level = "debug", skip(board), fields(board = %board))]
pub fn decide(
    board: &Board,
    side: Side,
    skill: SkillProfile,
) -> Result<(&'static str, Choice), EngineError> {
    let empty = empty_cells(board);
    if empty.is_empty() {
        return Err(EngineError::board_full());
    }

    for rule in skill.cascade() {
        if let Some(choice) = (rule.apply)(board, side) {
            debug!(rule = rule.name, ?choice, "Rule applied");
            return Ok((rule.name, choice));
        }
    }

    // Every cascade ends with a catch-all, so this only runs if one is
    // assembled without it.
    Ok(("fallback", Choice::AnyOf(empty)))
}

/// Every square `skill` might play for `side`, given any random draw.
pub fn candidates(board: &Board, side: Side, skill: SkillProfile) -> Result<Vec<usize>, EngineError> {
    decide(board, side, skill).map(|(_, choice)| choice.options())
}

/// Picks a move using the supplied random source for tie-breaks.
pub fn choose_move<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    skill: SkillProfile,
    rng: &mut R,
) -> Result<usize, EngineError> {
    let (_, choice) = decide(board, side, skill)?;
    choice.pick(rng).ok_or_else(EngineError::board_full)
}

/// Rule-based tic-tac-toe player.
///
/// Stateless apart from its random source: every call looks only at the
/// board it is given.
#[derive(Debug, Clone)]
pub struct HeuristicPlayer<R = SmallRng> {
    rng: R,
}

impl HeuristicPlayer<SmallRng> {
    /// Player seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Deterministic player for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for HeuristicPlayer<SmallRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> HeuristicPlayer<R> {
    /// Player drawing tie-breaks from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Best move for `side` on `board` at the given skill.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] with kind `BoardFull` if no square is empty.
    #[instrument(skip(self, board), fields(board = %board))]
    pub fn best_move(
        &mut self,
        board: &Board,
        side: Side,
        skill: SkillProfile,
    ) -> Result<usize, EngineError> {
        let pos = choose_move(board, side, skill, &mut self.rng)?;
        debug!(pos, "Engine chose move");
        Ok(pos)
    }
}
