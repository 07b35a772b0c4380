//! The rule cascade.
//!
//! Each rule looks at a board from the point of view of `side` and either
//! proposes a [`Choice`] or passes. A skill profile is an ordered slice of
//! rules; the first rule that proposes something decides the move.

use crate::games::tictactoe::rules::{empty_cells, winner_side};
use crate::games::tictactoe::{Board, CENTER, CORNERS, EDGES, OPPOSITE_CORNERS, Side};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

/// What a rule proposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Exactly this square.
    Forced(usize),
    /// Any of these squares, picked uniformly at random. Never empty.
    AnyOf(Vec<usize>),
}

impl Choice {
    /// Every square this choice could resolve to.
    pub fn options(&self) -> Vec<usize> {
        match self {
            Choice::Forced(pos) => vec![*pos],
            Choice::AnyOf(options) => options.clone(),
        }
    }

    /// Resolves the choice to a single square.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        match self {
            Choice::Forced(pos) => Some(*pos),
            Choice::AnyOf(options) => options.choose(rng).copied(),
        }
    }
}

/// Builds an [`Choice::AnyOf`], or passes when there is nothing to pick.
fn any_of(options: Vec<usize>) -> Option<Choice> {
    if options.is_empty() {
        None
    } else {
        Some(Choice::AnyOf(options))
    }
}

/// A named step of the cascade.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Short name used in logs.
    pub name: &'static str,
    /// Proposes a move for the given side, or passes.
    pub apply: fn(&Board, Side) -> Option<Choice>,
}

/// Take an immediate win.
pub const WIN: Rule = Rule {
    name: "win",
    apply: winning_move,
};

/// Block the opponent's immediate win.
pub const BLOCK: Rule = Rule {
    name: "block",
    apply: blocking_move,
};

/// Create two threats at once.
pub const FORK: Rule = Rule {
    name: "fork",
    apply: fork_move,
};

/// Deny the opponent a fork.
pub const BLOCK_FORK: Rule = Rule {
    name: "block-fork",
    apply: block_fork_move,
};

/// Take the center.
pub const TAKE_CENTER: Rule = Rule {
    name: "center",
    apply: center_move,
};

/// Answer an opponent corner with the opposite corner.
pub const OPPOSITE_CORNER: Rule = Rule {
    name: "opposite-corner",
    apply: opposite_corner_move,
};

/// Take any empty corner.
pub const CORNER: Rule = Rule {
    name: "corner",
    apply: corner_move,
};

/// Take any empty edge.
pub const EDGE: Rule = Rule {
    name: "edge",
    apply: edge_move,
};

/// Take any empty square.
pub const ANY_EMPTY: Rule = Rule {
    name: "any-empty",
    apply: any_empty_move,
};

/// Uniformly random play.
pub const RANDOM: &[Rule] = &[ANY_EMPTY];

/// Win, block, then positional preference.
pub const INTERMEDIATE: &[Rule] = &[WIN, BLOCK, TAKE_CENTER, CORNER, EDGE, ANY_EMPTY];

/// The full cascade. `ANY_EMPTY` is a catch-all that the earlier rules
/// already cover whenever a square is free.
pub const PERFECT: &[Rule] = &[
    WIN,
    BLOCK,
    FORK,
    BLOCK_FORK,
    TAKE_CENTER,
    OPPOSITE_CORNER,
    CORNER,
    EDGE,
    ANY_EMPTY,
];

/// Empty squares where placing `side` completes a line, ascending.
pub fn winning_cells(board: &Board, side: Side) -> Vec<usize> {
    empty_cells(board)
        .into_iter()
        .filter(|&pos| winner_side(&board.with_move(pos, side)) == Some(side))
        .collect()
}

/// Number of distinct empty squares that would each win for `side`.
pub fn count_winning_follow_ups(board: &Board, side: Side) -> usize {
    winning_cells(board, side).len()
}

/// Empty squares where `side` would create a fork (two or more winning
/// follow-ups), ascending.
pub fn fork_cells(board: &Board, side: Side) -> Vec<usize> {
    empty_cells(board)
        .into_iter()
        .filter(|&pos| count_winning_follow_ups(&board.with_move(pos, side), side) >= 2)
        .collect()
}

/// Lowest-index square that wins immediately for `side`.
pub fn winning_move(board: &Board, side: Side) -> Option<Choice> {
    winning_cells(board, side).first().copied().map(Choice::Forced)
}

/// Lowest-index square that stops the opponent winning next turn.
pub fn blocking_move(board: &Board, side: Side) -> Option<Choice> {
    winning_move(board, side.opponent())
}

/// Lowest-index square that gives `side` two threats.
pub fn fork_move(board: &Board, side: Side) -> Option<Choice> {
    fork_cells(board, side).first().copied().map(Choice::Forced)
}

/// Denies the opponent a fork.
///
/// A single opponent fork square is simply occupied. With several, no one
/// square covers them all, so `side` makes a threat of its own instead: any
/// square that leaves `side` with an immediate win, provided the opponent's
/// forced block does not itself hand them a fork. Edges are preferred, then
/// any square. If no such threat exists the rule passes.
pub fn block_fork_move(board: &Board, side: Side) -> Option<Choice> {
    let opponent = side.opponent();
    let forks = fork_cells(board, opponent);
    match forks.as_slice() {
        [] => None,
        [only] => Some(Choice::Forced(*only)),
        _ => {
            trace!(?forks, "Opponent has several fork squares");
            let edges = forcing_defences(board, side, EDGES.into_iter());
            if !edges.is_empty() {
                return Some(Choice::AnyOf(edges));
            }
            any_of(forcing_defences(board, side, empty_cells(board).into_iter()))
        }
    }
}

/// Squares among `candidates` where `side` threatens to win and the
/// opponent's block leaves them without a fork.
fn forcing_defences(board: &Board, side: Side, candidates: impl Iterator<Item = usize>) -> Vec<usize> {
    let opponent = side.opponent();
    candidates
        .filter(|&pos| board.is_empty(pos))
        .filter(|&pos| {
            let after = board.with_move(pos, side);
            match winning_cells(&after, side).as_slice() {
                [] => false,
                [reply] => count_winning_follow_ups(&after.with_move(*reply, opponent), opponent) < 2,
                _ => true,
            }
        })
        .collect()
}

/// The center square, if free.
pub fn center_move(board: &Board, _side: Side) -> Option<Choice> {
    board.is_empty(CENTER).then_some(Choice::Forced(CENTER))
}

/// Opposite an opponent-held corner, checking (0,8) then (2,6).
pub fn opposite_corner_move(board: &Board, side: Side) -> Option<Choice> {
    let opponent = side.opponent();
    OPPOSITE_CORNERS.iter().find_map(|&(a, b)| {
        if board.is_occupied_by(a, opponent) && board.is_empty(b) {
            Some(Choice::Forced(b))
        } else if board.is_occupied_by(b, opponent) && board.is_empty(a) {
            Some(Choice::Forced(a))
        } else {
            None
        }
    })
}

/// Any empty corner.
pub fn corner_move(board: &Board, _side: Side) -> Option<Choice> {
    any_of(CORNERS.into_iter().filter(|&pos| board.is_empty(pos)).collect())
}

/// Any empty edge.
pub fn edge_move(board: &Board, _side: Side) -> Option<Choice> {
    any_of(EDGES.into_iter().filter(|&pos| board.is_empty(pos)).collect())
}

/// Any empty square.
pub fn any_empty_move(board: &Board, _side: Side) -> Option<Choice> {
    any_of(empty_cells(board))
}
