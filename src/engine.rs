//! Computer player: picks one move for a side
//!
//! The engine turns a difficulty tier into a move decision:
//!
//! 1. **No legal move**: returns `None` (the caller treats this as a loss)
//! 2. **Single legal move**: played immediately, no search
//! 3. **Easy**: uniform random choice, captures preferred
//! 4. **Medium / Hard**: alpha-beta search at the tier's depth
//!
//! # Example
//!
//! ```
//! use draughts::{AIEngine, Board, Color, Difficulty, RuleConfig};
//!
//! let mut engine = AIEngine::with_seed(Difficulty::Medium, RuleConfig::default(), 7);
//! let board = Board::new();
//! let result = engine.choose_move_with_stats(&board, Color::White);
//! assert!(result.best_move.is_some());
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::board::{Board, Color};
use crate::config::{Difficulty, GameConfig, RuleConfig};
use crate::rules::{all_moves, Move};
use crate::search::{SearchParams, Searcher};

/// Which decision path produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// The side had no legal move
    NoMove,
    /// Only one legal move existed
    OnlyMove,
    /// Easy tier random pick
    Random,
    /// Alpha-beta search result
    AlphaBeta,
}

/// Result of a move decision with statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveResult {
    /// Chosen move, None when the side has no legal move
    pub best_move: Option<Move>,
    /// Search score (positive favors White); None when no search ran
    pub score: Option<i32>,
    /// Decision path
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Nodes visited by the search
    pub nodes: u64,
}

impl MoveResult {
    #[inline]
    fn unsearched(best_move: Option<Move>, search_type: SearchType, start: Instant) -> Self {
        Self {
            best_move,
            score: None,
            search_type,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: 0,
        }
    }
}

/// Pick uniformly among the captures in `moves`, or among all moves when
/// there is no capture.
pub fn pick_random<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    let captures: Vec<Move> = moves.iter().copied().filter(Move::is_capture).collect();
    let pool: &[Move] = if captures.is_empty() { moves } else { &captures };
    if pool.is_empty() {
        return None;
    }
    Some(pool[rng.random_range(0..pool.len())])
}

/// Difficulty-tuned move chooser.
///
/// Stateless across calls apart from the random generator used by the
/// easy tier.
pub struct AIEngine {
    difficulty: Difficulty,
    rules: RuleConfig,
    rng: StdRng,
}

impl AIEngine {
    /// Engine seeded from the operating system
    pub fn new(difficulty: Difficulty, rules: RuleConfig) -> Self {
        Self {
            difficulty,
            rules,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Engine with a fixed seed, for reproducible easy-tier play
    pub fn with_seed(difficulty: Difficulty, rules: RuleConfig, seed: u64) -> Self {
        Self {
            difficulty,
            rules,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.difficulty, config.rules)
    }

    /// Choose a move for `color`, or None if it has no legal move
    pub fn choose_move(&mut self, board: &Board, color: Color) -> Option<Move> {
        self.choose_move_with_stats(board, color).best_move
    }

    /// Choose among every legal move of `color`
    pub fn choose_move_with_stats(&mut self, board: &Board, color: Color) -> MoveResult {
        let moves = all_moves(board, color, self.rules.mandatory_capture);
        self.choose_from(board, color, moves)
    }

    /// Choose among the given candidate moves of `color`.
    ///
    /// The candidates must be legal on `board`; the search below the root
    /// generates its own moves.
    pub fn choose_from(&mut self, board: &Board, color: Color, moves: Vec<Move>) -> MoveResult {
        let start = Instant::now();

        match moves.len() {
            0 => {
                debug!(?color, "no legal move");
                return MoveResult::unsearched(None, SearchType::NoMove, start);
            }
            1 => {
                trace!(?color, mv = %moves[0], "only move");
                return MoveResult::unsearched(Some(moves[0]), SearchType::OnlyMove, start);
            }
            _ => {}
        }

        if self.difficulty == Difficulty::Easy {
            let mv = pick_random(&moves, &mut self.rng);
            return MoveResult::unsearched(mv, SearchType::Random, start);
        }

        let profile = self.difficulty.profile();
        let mut searcher = Searcher::new(SearchParams {
            depth: profile.depth,
            order_moves: profile.order_moves,
            weights: profile.weights,
            mandatory_capture: self.rules.mandatory_capture,
        });
        let result = searcher.search_moves(board, color, moves);

        MoveResult {
            best_move: result.best_move,
            score: Some(result.score),
            search_type: SearchType::AlphaBeta,
            time_ms: start.elapsed().as_millis() as u64,
            nodes: result.nodes,
        }
    }
}

/// One-shot move choice for a snapshot of the game
pub fn choose_move(board: &Board, color: Color, config: &GameConfig) -> Option<Move> {
    AIEngine::from_config(config).choose_move(board, color)
}
