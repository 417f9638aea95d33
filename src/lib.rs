//! International draughts engine with the optional soufflée rule
//!
//! A 10x10 draughts engine implementing:
//! - Men move one step forward and capture in all four diagonal directions
//! - Flying kings that slide and capture along open diagonals
//! - Optional mandatory capture, with capture chains by a single piece
//! - Optional soufflée rule: forfeiting a capture gets a piece blown
//! - A computer player using alpha-beta search tuned by difficulty
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards
//! - [`rules`]: Move generation and move application
//! - [`config`]: Rule options, difficulty and game mode
//! - [`eval`]: Static position evaluation
//! - [`search`]: Alpha-beta minimax
//! - [`engine`]: Difficulty-tuned move chooser
//! - [`worker`]: Runs the computer's search on its own thread
//! - [`game`]: Turn state machine driven by player intents
//!
//! # Quick Start
//!
//! ```
//! use draughts::{GameConfig, GameState};
//!
//! let mut game = GameState::new(GameConfig::default()).unwrap();
//!
//! // Black moves first
//! game.select_square(3, 2).unwrap();
//! let snapshot = game.choose_destination(4, 3).unwrap();
//! assert_eq!(snapshot.current, draughts::Color::White);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;
pub mod worker;

// Re-export commonly used types for convenience
pub use board::{Board, Color, Piece, Pos, Rank, BOARD_SIZE};
pub use config::{ConfigError, Difficulty, GameConfig, GameMode, RuleConfig};
pub use engine::{AIEngine, MoveResult, SearchType};
pub use game::{GameEvent, GameSnapshot, GameState, Phase, Rejection};
pub use rules::Move;
