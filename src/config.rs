//! Game configuration: rule options, difficulty and player setup
//!
//! Configuration is fixed for the lifetime of a game. Changing any option
//! means constructing a new [`crate::game::GameState`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::BoardError;
use crate::eval::EvalWeights;

/// Optional rules that change what a legal move is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// A side with a capture available must capture
    pub mandatory_capture: bool,
    /// Forfeiting an available capture gets a piece blown (requires
    /// `mandatory_capture`)
    pub soufflee: bool,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            mandatory_capture: true,
            soufflee: false,
        }
    }
}

impl RuleConfig {
    /// Whether a player's selection is limited to capturing pieces and moves
    /// when a capture exists.
    ///
    /// Under the soufflée rule capturing stays mandatory, but the penalty is
    /// applied after the fact instead of blocking the choice.
    #[inline]
    pub fn restricts_to_captures(&self) -> bool {
        self.mandatory_capture && !self.soufflee
    }
}

/// Computer strength
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// Search settings derived from a difficulty tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Plies searched by alpha-beta (Easy does not search)
    pub depth: u8,
    /// Sort moves before expanding a node
    pub order_moves: bool,
    /// Evaluator weights
    pub weights: EvalWeights,
}

impl Difficulty {
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                depth: 1,
                order_moves: false,
                weights: EvalWeights::BASIC,
            },
            Difficulty::Medium => DifficultyProfile {
                depth: 4,
                order_moves: true,
                weights: EvalWeights::BASIC,
            },
            Difficulty::Hard => DifficultyProfile {
                depth: 7,
                order_moves: true,
                weights: EvalWeights::EXPERT,
            },
        }
    }
}

/// Who controls each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans sharing the board (hotseat)
    #[default]
    HumanVsHuman,
    /// Human plays Black, the computer plays White
    HumanVsComputer,
}

/// Everything fixed at game start
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub rules: RuleConfig,
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

/// Invalid game setup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the soufflee rule requires mandatory capture to be enabled")]
    SouffleeRequiresMandatoryCapture,

    #[error("invalid starting position: {0}")]
    InvalidPosition(#[from] BoardError),
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.soufflee && !self.rules.mandatory_capture {
            return Err(ConfigError::SouffleeRequiresMandatoryCapture);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.rules.mandatory_capture);
        assert!(!config.rules.soufflee);
    }

    #[test]
    fn test_soufflee_requires_mandatory_capture() {
        let config = GameConfig {
            rules: RuleConfig {
                mandatory_capture: false,
                soufflee: true,
            },
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SouffleeRequiresMandatoryCapture)
        );
    }

    #[test]
    fn test_restricts_to_captures() {
        let strict = RuleConfig::default();
        assert!(strict.restricts_to_captures());

        let soufflee = RuleConfig {
            mandatory_capture: true,
            soufflee: true,
        };
        assert!(!soufflee.restricts_to_captures());

        let free = RuleConfig {
            mandatory_capture: false,
            soufflee: false,
        };
        assert!(!free.restricts_to_captures());
    }

    #[test]
    fn test_difficulty_depths_increase() {
        let easy = Difficulty::Easy.profile();
        let medium = Difficulty::Medium.profile();
        let hard = Difficulty::Hard.profile();
        assert_eq!(easy.depth, 1);
        assert!(medium.depth >= 3 && medium.depth <= 4);
        assert!(hard.depth >= 5 && hard.depth <= 8);
        assert!(hard.depth > medium.depth);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = GameConfig {
            rules: RuleConfig {
                mandatory_capture: true,
                soufflee: true,
            },
            difficulty: Difficulty::Hard,
            mode: GameMode::HumanVsComputer,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
