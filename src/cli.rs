//! Command-line interface for tictactoe_oracle.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_oracle::{Board, Side, SkillProfile};

/// Tic-tac-toe move oracle - perfect-play engine with an LLM front end
#[derive(Parser, Debug)]
#[command(name = "tictactoe_oracle")]
#[command(about = "Rule-based tic-tac-toe engine with remote-first move selection", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the offline engine's move for a board
    Move {
        /// Board as 9 cells: X, O, and . for empty (e.g. "XO..X....")
        #[arg(short, long)]
        board: Board,

        /// Side to move
        #[arg(short, long)]
        side: Side,

        /// Skill profile (random/easy, intermediate/medium, perfect/hard)
        #[arg(long, default_value = "perfect")]
        skill: SkillProfile,

        /// Seed for random tie-breaks
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a hint for the human side
    Hint {
        /// Board as 9 cells: X, O, and . for empty
        #[arg(short, long)]
        board: Board,

        /// Path to oracle config
        #[arg(short, long, default_value = "oracle.toml")]
        config: PathBuf,

        /// Skip the remote move source
        #[arg(long)]
        offline: bool,
    },

    /// Play a game against the engine in the terminal
    Play {
        /// Engine skill profile
        #[arg(long, default_value = "perfect")]
        skill: SkillProfile,

        /// Path to oracle config
        #[arg(short, long, default_value = "oracle.toml")]
        config: PathBuf,

        /// Let the engine move first
        #[arg(long)]
        engine_first: bool,

        /// Skip the remote move source
        #[arg(long)]
        offline: bool,
    },

    /// Play the offline engine against itself and tally results
    Selfplay {
        /// Number of games
        #[arg(short, long, default_value = "100")]
        games: u32,

        /// Skill for X (moves first)
        #[arg(long, default_value = "perfect")]
        x_skill: SkillProfile,

        /// Skill for O
        #[arg(long, default_value = "perfect")]
        o_skill: SkillProfile,

        /// Seed for random tie-breaks
        #[arg(long)]
        seed: Option<u64>,
    },
}
