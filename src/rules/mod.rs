//! Game rules for 10x10 draughts
//!
//! This module implements the rule set shared by human and computer play:
//! - Move generation (men, flying kings, mandatory capture filtering)
//! - Applying and reverting single moves, including promotion

pub mod apply;
pub mod moves;

// Re-exports for convenient access
pub use apply::{make_move, promote_if_needed, unmake_move, Undo};
pub use moves::{
    all_moves, capture_sources, has_any_move, mandatory_captures, mobility, moves_for, Move,
    PieceMoves,
};
