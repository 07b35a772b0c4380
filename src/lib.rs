//! Tic-tac-toe move oracle.
//!
//! A rule-based engine that plays perfect tic-tac-toe, fronted by an oracle
//! that prefers a remote (LLM) move source and falls back to the engine when
//! the remote is slow, offline, rate limited or wrong.
//!
//! # Architecture
//!
//! - **Games**: board model, win/draw rules and a turn-alternating game record
//! - **Engine**: the skill-profile rule cascades (`HeuristicPlayer`)
//! - **Oracle**: remote-first move selection with timeout, cooldown breaker
//!   and hint-by-relabeling (`MoveOracle`)
//! - **LLM**: a concrete remote move source over OpenAI, Anthropic or Gemini
//!
//! # Example
//!
//! ```
//! use tictactoe_oracle::{Board, HeuristicPlayer, Side, SkillProfile};
//!
//! let board: Board = "XX.OO....".parse().unwrap();
//! let mut engine = HeuristicPlayer::seeded(7);
//! // X completes the top row.
//! assert_eq!(engine.best_move(&board, Side::X, SkillProfile::Perfect).unwrap(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod games;
pub mod llm_client;
pub mod llm_resolver;
pub mod oracle;

// Crate-level exports - Configuration
pub use config::{ConfigError, OracleConfig};

// Crate-level exports - Engine
pub use engine::{EngineError, EngineErrorKind, HeuristicPlayer, SkillProfile};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};
pub use llm_resolver::LlmResolver;

// Crate-level exports - Oracle
pub use oracle::{
    BreakerState, Connectivity, ConnectivityFlag, MoveOracle, MoveResolver, NoRemote,
    ResolverError, ResolverErrorKind,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, BoardParseError, Game, GameStatus, MoveError, Position, Side, Square, Winner,
};
