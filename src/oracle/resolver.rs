//! The remote move source seam.

use super::error::{ResolverError, ResolverErrorKind};
use crate::engine::SkillProfile;
use crate::games::tictactoe::{Board, Side};
use tracing::{debug, instrument};

/// A remote source of move suggestions, such as an LLM.
///
/// Implementations return the raw index they were given; the oracle checks
/// range and occupancy itself, so a resolver need not trust its provider.
#[async_trait::async_trait]
pub trait MoveResolver: Send + Sync {
    /// Suggests a move for `side` on `board` at the given skill.
    async fn resolve(
        &self,
        board: Board,
        side: Side,
        skill: SkillProfile,
    ) -> Result<i64, ResolverError>;

    /// Name used in logs.
    fn name(&self) -> &str {
        "remote"
    }
}

/// Resolver for when no remote source is configured. Always fails with
/// [`ResolverErrorKind::Offline`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemote;

#[async_trait::async_trait]
impl MoveResolver for NoRemote {
    async fn resolve(
        &self,
        _board: Board,
        _side: Side,
        _skill: SkillProfile,
    ) -> Result<i64, ResolverError> {
        Err(ResolverError::new(ResolverErrorKind::Offline))
    }

    fn name(&self) -> &str {
        "none"
    }
}

/// Accepts `raw` only if it is an index 0-8 naming an empty square.
#[instrument(level = "debug", skip(board), fields(board = %board))]
pub fn validate_reply(board: &Board, raw: i64) -> Result<usize, ResolverError> {
    let pos = usize::try_from(raw)
        .ok()
        .filter(|&pos| board.is_empty(pos))
        .ok_or_else(|| ResolverError::new(ResolverErrorKind::IllegalMove(raw)))?;
    debug!(pos, "Remote reply is a legal move");
    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reply() {
        let board: Board = "X...O....".parse().unwrap();
        assert_eq!(validate_reply(&board, 8).unwrap(), 8);
        for bad in [-1, 9, 42, 0, 4] {
            let err = validate_reply(&board, bad).unwrap_err();
            assert_eq!(err.kind, ResolverErrorKind::IllegalMove(bad));
        }
    }
}
