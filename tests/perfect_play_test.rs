//! Exhaustive checks that the perfect profile never loses.
//!
//! Every opponent reply and every square the engine might pick on a random
//! tie-break is explored, so these hold for any seed.

use tictactoe_oracle::engine::{SkillProfile, candidates};
use tictactoe_oracle::games::tictactoe::rules::{check_winner, empty_cells};
use tictactoe_oracle::{Board, Side};

#[derive(Debug, Default)]
struct Tally {
    engine_wins: u32,
    opponent_wins: u32,
    draws: u32,
}

fn explore(board: Board, to_move: Side, engine: Side, tally: &mut Tally) {
    if let Some(winner) = check_winner(&board) {
        if winner.side == engine {
            tally.engine_wins += 1;
        } else {
            tally.opponent_wins += 1;
            panic!("{engine} lost on {board}");
        }
        return;
    }
    if empty_cells(&board).is_empty() {
        tally.draws += 1;
        return;
    }
    let moves = if to_move == engine {
        candidates(&board, engine, SkillProfile::Perfect).unwrap()
    } else {
        empty_cells(&board)
    };
    for pos in moves {
        explore(board.with_move(pos, to_move), to_move.opponent(), engine, tally);
    }
}

#[test]
fn test_never_loses_moving_first() {
    for engine in [Side::X, Side::O] {
        let mut tally = Tally::default();
        explore(Board::new(), engine, engine, &mut tally);
        assert_eq!(tally.opponent_wins, 0);
        assert!(tally.engine_wins > 0, "{tally:?}");
    }
}

#[test]
fn test_never_loses_moving_second() {
    for engine in [Side::X, Side::O] {
        let mut tally = Tally::default();
        explore(Board::new(), engine.opponent(), engine, &mut tally);
        assert_eq!(tally.opponent_wins, 0);
        assert!(tally.draws > 0, "{tally:?}");
    }
}

#[test]
fn test_self_play_always_draws() {
    fn walk(board: Board, to_move: Side, draws: &mut u32) {
        assert!(check_winner(&board).is_none(), "decisive self-play on {board}");
        let moves = candidates(&board, to_move, SkillProfile::Perfect).unwrap_or_default();
        if moves.is_empty() {
            *draws += 1;
            return;
        }
        for pos in moves {
            walk(board.with_move(pos, to_move), to_move.opponent(), draws);
        }
    }

    for first in [Side::X, Side::O] {
        let mut draws = 0;
        walk(Board::new(), first, &mut draws);
        assert!(draws > 0);
    }
}

#[test]
fn test_beats_random_play_sometimes() {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use tictactoe_oracle::engine::choose_move;
    use tictactoe_oracle::{Game, GameStatus};

    let mut rng = SmallRng::seed_from_u64(2024);
    let mut perfect_wins = 0;
    for _ in 0..200 {
        let mut game = Game::new(Side::X);
        while game.is_in_progress() {
            let skill = match game.to_move() {
                Side::X => SkillProfile::Random,
                Side::O => SkillProfile::Perfect,
            };
            let pos = choose_move(game.board(), game.to_move(), skill, &mut rng).unwrap();
            game.make_move(pos).unwrap();
        }
        match game.status() {
            GameStatus::Won(winner) => {
                assert_eq!(winner.side, Side::O);
                perfect_wins += 1;
            }
            GameStatus::Draw => {}
            GameStatus::InProgress => unreachable!(),
        }
    }
    assert!(perfect_wins > 100, "only {perfect_wins} wins out of 200");
}
