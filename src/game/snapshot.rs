//! Read-only view of a game for rendering

use serde::Serialize;

use crate::board::{Color, Piece, Pos, TOTAL_CELLS};

use super::events::GameEvent;
use super::state::{CapturedCounts, Phase};

/// Everything a presentation layer needs after an intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cells, `TOTAL_CELLS` entries
    pub cells: Vec<Option<Piece>>,
    pub current: Color,
    pub phase: Phase,
    pub selected: Option<Pos>,
    /// Legal destinations of the selected piece
    pub destinations: Vec<Pos>,
    /// Pieces of the side to move that have a capture available
    pub must_capture: Vec<Pos>,
    /// Whether `must_capture` should be shown to the player
    pub highlight_must_capture: bool,
    pub chain_active: bool,
    pub computer_thinking: bool,
    pub captured: CapturedCounts,
    /// What the last intent caused, in order
    pub events: Vec<GameEvent>,
}

impl GameSnapshot {
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        debug_assert_eq!(self.cells.len(), TOTAL_CELLS);
        self.cells[pos.to_index()]
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            Phase::GameOver { winner, .. } => Some(winner),
            _ => None,
        }
    }
}
