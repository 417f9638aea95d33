//! Draughts engine demo
//!
//! Plays a full game through the public intent API: Black is driven by a
//! local engine through `select_square`/`choose_destination`, White is the
//! computer player searching on its worker thread.

use std::error::Error;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use draughts::rules::moves_for;
use draughts::{AIEngine, Difficulty, GameConfig, GameMode, GameSnapshot, GameState, Phase, RuleConfig};

#[derive(Parser, Debug)]
#[command(name = "draughts", about = "Self-play demo of the 10x10 draughts engine")]
struct Args {
    /// Strength of both players
    #[arg(long, value_enum, default_value_t = Difficulty::Medium)]
    difficulty: Difficulty,

    /// Allow simple moves while a capture is available
    #[arg(long)]
    no_mandatory_capture: bool,

    /// Enable the soufflée rule
    #[arg(long)]
    soufflee: bool,

    /// Stop after this many moves
    #[arg(long, default_value_t = 200)]
    max_plies: u32,

    /// Seed for easy-tier random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Only print the result
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = GameConfig {
        rules: RuleConfig {
            mandatory_capture: !args.no_mandatory_capture,
            soufflee: args.soufflee,
        },
        difficulty: args.difficulty,
        mode: GameMode::HumanVsComputer,
    };

    let mut game = GameState::new(config)?;
    let mut black = match args.seed {
        Some(seed) => {
            game.set_computer_seed(seed);
            AIEngine::with_seed(config.difficulty, config.rules, seed.rotate_left(32))
        }
        None => AIEngine::new(config.difficulty, config.rules),
    };

    if !args.quiet {
        println!("{}", game.board());
    }

    let mut plies = 0;
    while !game.is_over() && plies < args.max_plies {
        let snapshot = if game.is_computer_turn() {
            game.request_computer_move()?;
            game.wait_computer_move()?
        } else {
            play_local(&mut game, &mut black)?
        };
        plies += 1;

        if !args.quiet {
            for event in &snapshot.events {
                println!("{event:?}");
            }
            println!("{}", game.board());
        }
    }

    match game.phase() {
        Phase::GameOver { winner, reason } => println!("{winner:?} wins ({reason:?}) after {plies} moves"),
        _ => println!("No result after {plies} moves"),
    }
    let captured = game.snapshot().captured;
    println!("Pieces lost: Black {}, White {}", captured.black, captured.white);

    Ok(())
}

/// Pick a move for the side to move and submit it as player intents
fn play_local(game: &mut GameState, engine: &mut AIEngine) -> Result<GameSnapshot, Box<dyn Error>> {
    let board = *game.board();
    let side = game.current();
    let snapshot = game.snapshot();

    let result = match (snapshot.phase, snapshot.selected) {
        (Phase::CaptureChain, Some(pos)) => engine.choose_from(&board, side, moves_for(&board, pos).capture),
        _ => engine.choose_move_with_stats(&board, side),
    };
    let Some(mv) = result.best_move else {
        return Ok(snapshot);
    };

    if snapshot.phase != Phase::CaptureChain {
        game.select_square(mv.from.row.into(), mv.from.col.into())?;
    }
    Ok(game.choose_destination(mv.to.row.into(), mv.to.col.into())?)
}
