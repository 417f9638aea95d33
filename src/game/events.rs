//! Notifications emitted by the turn state machine
//!
//! Each intent replaces the event list with what it caused, in order. A
//! presentation layer renders these; the engine attaches no timing to them.

use serde::Serialize;

use crate::board::{Color, Piece, Pos};
use crate::rules::Move;

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameOverReason {
    /// The loser has no pieces left
    NoPieces,
    /// The loser has pieces but no legal move or capture
    Blocked,
}

/// Why a piece was blown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlowReason {
    /// A simple move was played while a capture was available
    ForfeitedCapture,
    /// The capture chain was not continued in time
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// A piece moved (capture or not)
    Moved { mv: Move, piece: Piece },
    /// A piece was jumped and removed
    Captured { pos: Pos, piece: Piece },
    /// A man reached its promotion row
    Promoted { pos: Pos, color: Color },
    /// The piece on `pos` must keep capturing
    ChainContinues { pos: Pos },
    /// A simple move forfeited an available capture
    SouffleePending { color: Color },
    /// A piece was removed as a soufflée penalty
    Blown { pos: Pos, piece: Piece, reason: BlowReason },
    /// The computer committed its move
    ComputerMoved { mv: Move },
    /// Control passed to `color`
    TurnChanged { color: Color },
    GameOver { winner: Color, reason: GameOverReason },
}
