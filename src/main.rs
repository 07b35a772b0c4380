//! Tictactoe Oracle - Unified CLI
//!
//! Offline engine queries, hints, interactive play and self-play.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use tictactoe_oracle::{
    Board, ConnectivityFlag, Game, GameStatus, HeuristicPlayer, LlmClient, LlmResolver,
    MoveOracle, MoveResolver, NoRemote, OracleConfig, Position, Side, SkillProfile,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Move {
            board,
            side,
            skill,
            seed,
        } => run_move(board, side, skill, seed),
        Command::Hint {
            board,
            config,
            offline,
        } => run_hint(board, &config, offline).await,
        Command::Play {
            skill,
            config,
            engine_first,
            offline,
        } => run_play(skill, &config, engine_first, offline).await,
        Command::Selfplay {
            games,
            x_skill,
            o_skill,
            seed,
        } => run_selfplay(games, x_skill, o_skill, seed),
    }
}

/// Loads the config file if present, defaults otherwise.
#[instrument(skip(path), fields(path = %path.display()))]
fn load_config(path: &Path) -> Result<OracleConfig> {
    if path.exists() {
        Ok(OracleConfig::from_file(path)?)
    } else {
        info!("No config file, using defaults");
        Ok(OracleConfig::default())
    }
}

/// Builds the oracle and its remote move source.
///
/// Without an API key, or with `offline`, the oracle is told the network is
/// down so every move comes from the offline engine.
#[instrument(skip(config))]
fn build_oracle(config: &OracleConfig, offline: bool) -> (MoveOracle, Arc<dyn MoveResolver>) {
    let oracle = MoveOracle::from_config(config);
    let offline_oracle = oracle
        .clone()
        .with_connectivity(Arc::new(ConnectivityFlag::new(false)));

    let no_remote: Arc<dyn MoveResolver> = Arc::new(NoRemote);
    if offline {
        return (offline_oracle, no_remote);
    }

    match config.create_llm_config() {
        Ok(llm) => {
            info!(provider = ?llm.provider(), model = %llm.model(), "Using LLM move source");
            let resolver: Arc<dyn MoveResolver> =
                Arc::new(LlmResolver::new(LlmClient::new(llm)));
            (oracle, resolver)
        }
        Err(e) => {
            warn!(error = %e, "No LLM available, using offline engine only");
            (offline_oracle, no_remote)
        }
    }
}

fn engine(seed: Option<u64>) -> HeuristicPlayer {
    seed.map(HeuristicPlayer::seeded)
        .unwrap_or_else(HeuristicPlayer::from_entropy)
}

fn describe(pos: usize) -> String {
    Position::from_index(pos)
        .map(|p| format!("{} ({})", pos, p.label()))
        .unwrap_or_else(|| pos.to_string())
}

/// Print the offline engine's move.
fn run_move(board: Board, side: Side, skill: SkillProfile, seed: Option<u64>) -> Result<()> {
    let pos = engine(seed).best_move(&board, side, skill)?;
    println!("{}", describe(pos));
    Ok(())
}

/// Print a hint for the human side.
async fn run_hint(board: Board, config_path: &Path, offline: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let (oracle, resolver) = build_oracle(&config, offline);
    let pos = oracle.request_hint(&board, resolver, config.timeout()).await;
    println!("{}", describe(pos));
    Ok(())
}

/// Interactive game on stdin/stdout.
async fn run_play(
    skill: SkillProfile,
    config_path: &Path,
    engine_first: bool,
    offline: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let (oracle, resolver) = build_oracle(&config, offline);
    let engine_side = oracle.engine_side();
    let human_side = engine_side.opponent();
    let first = if engine_first { engine_side } else { human_side };
    let mut game = Game::new(first);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("You are {human_side}. Enter 1-9 or a square name, 'hint' or 'quit'.");

    while game.is_in_progress() {
        println!("\n{}\n", game.board().display());

        if game.to_move() == engine_side {
            let pos = oracle
                .request_move(
                    game.board(),
                    engine_side,
                    skill,
                    resolver.clone(),
                    config.timeout(),
                )
                .await;
            game.make_move(pos)?;
            println!("Engine plays {}", describe(pos));
            continue;
        }

        println!("Your move:");
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let input = line.trim();
        match input.to_lowercase().as_str() {
            "quit" | "q" => return Ok(()),
            "hint" | "h" => {
                let pos = oracle
                    .request_hint(game.board(), resolver.clone(), config.timeout())
                    .await;
                println!("Hint: {}", describe(pos));
            }
            _ => match Position::from_label_or_number(input) {
                Some(position) => {
                    if let Err(e) = game.make_move(position.to_index()) {
                        println!("{e}");
                    }
                }
                None => println!("Unrecognized square: {input}"),
            },
        }
    }

    println!("\n{}\n", game.board().display());
    match game.status() {
        GameStatus::Won(winner) if winner.side == human_side => println!("You win!"),
        GameStatus::Won(_) => println!("Engine wins."),
        GameStatus::Draw | GameStatus::InProgress => println!("Draw."),
    }
    Ok(())
}

/// Engine against engine.
fn run_selfplay(
    games: u32,
    x_skill: SkillProfile,
    o_skill: SkillProfile,
    seed: Option<u64>,
) -> Result<()> {
    let mut player = engine(seed);
    let (mut x_wins, mut o_wins, mut draws) = (0u32, 0u32, 0u32);

    for _ in 0..games {
        let mut game = Game::new(Side::X);
        while game.is_in_progress() {
            let side = game.to_move();
            let skill = match side {
                Side::X => x_skill,
                Side::O => o_skill,
            };
            let pos = player.best_move(game.board(), side, skill)?;
            game.make_move(pos)?;
        }
        match game.status() {
            GameStatus::Won(winner) if winner.side == Side::X => x_wins += 1,
            GameStatus::Won(_) => o_wins += 1,
            GameStatus::Draw | GameStatus::InProgress => draws += 1,
        }
    }

    println!("X ({x_skill}) wins: {x_wins}");
    println!("O ({o_skill}) wins: {o_wins}");
    println!("Draws: {draws}");
    Ok(())
}
