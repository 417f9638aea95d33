//! Search module for the draughts AI
//!
//! Contains:
//! - Alpha-beta minimax over a private board copy
//! - Move ordering to improve pruning

pub mod alphabeta;
pub mod ordering;

pub use alphabeta::{SearchParams, SearchResult, SearchStats, Searcher};
pub use ordering::order_moves;
