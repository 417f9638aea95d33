//! Position evaluation for the draughts search

pub mod heuristic;
pub mod weights;

pub use heuristic::evaluate;
pub use weights::{EvalWeights, WIN_SCORE};
