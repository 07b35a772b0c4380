//! Offline move engine.
//!
//! A rule cascade rather than a search: each skill profile is an ordered list
//! of rules and the first one that applies picks the move.

pub mod cascade;
mod error;
mod player;
mod skill;

pub use cascade::{Choice, Rule, count_winning_follow_ups, fork_cells, winning_cells};
pub use error::{EngineError, EngineErrorKind};
pub use player::{HeuristicPlayer, candidates, choose_move, decide};
pub use skill::SkillProfile;
