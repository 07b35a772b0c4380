//! Engine error types.

use derive_more::{Display, Error};
use tracing::{error, instrument};

/// What went wrong inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// Asked for a move on a board with no empty square.
    #[display("no empty square left to play")]
    BoardFull,
}

/// Engine error with caller location tracking.
///
/// These signal a bug in the caller's turn logic and are not meant to be
/// retried.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// Error kind.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        error!(%kind, "Engine precondition violated");
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`EngineErrorKind::BoardFull`].
    #[track_caller]
    pub fn board_full() -> Self {
        Self::new(EngineErrorKind::BoardFull)
    }
}
