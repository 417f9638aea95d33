//! Rejected player intents

use thiserror::Error;

/// Why an intent was refused. A rejected intent never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("that square does not hold one of your pieces")]
    NotYourPiece,

    #[error("a capture is available: select a piece that can capture")]
    MustCapture,

    #[error("that piece cannot move there")]
    IllegalDestination,

    #[error("the game is over")]
    GameOver,

    #[error("it is the computer's turn")]
    NotYourTurn,

    #[error("the computer is still thinking")]
    ComputerThinking,

    #[error("finish the capture chain with the same piece")]
    CaptureChainInProgress,
}
