//! Turn state machine for a single game
//!
//! [`GameState`] owns the authoritative board. Players drive it through
//! intents (`select_square`, `choose_destination`, `request_computer_move`)
//! and read it back through [`GameSnapshot`]s.

pub mod error;
pub mod events;
pub mod snapshot;
pub mod state;
pub mod timer;

pub use error::Rejection;
pub use events::{BlowReason, GameEvent, GameOverReason};
pub use snapshot::GameSnapshot;
pub use state::{CapturedCounts, GameState, Phase};
pub use timer::{SouffleeTimer, SOUFFLEE_TIMEOUT};
