//! Error types for game play.
//!
//! Every error is local to one game: the engine surfaces it, the simulator
//! records the game as failed and moves on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::category::Category;

/// Errors raised while playing a game.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    /// A category was filled a second time.
    #[error("category {0} is already filled")]
    CategoryAlreadyFilled(Category),

    /// A category was requested but the scorecard is complete.
    #[error("no open category left on the scorecard")]
    NoOpenCategory,

    /// Dice or turn state does not allow the requested operation.
    #[error("invalid dice state: {0}")]
    InvalidDiceState(#[from] DiceStateError),
}

/// Details of an [`GameError::InvalidDiceState`].
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum DiceStateError {
    /// A hold mask referenced a die that does not exist.
    #[error("die index {index} is out of range (0..5)")]
    IndexOutOfRange { index: usize },

    /// A die value outside 1..=6.
    #[error("die face {value} is out of range (1..=6)")]
    FaceOutOfRange { value: u8 },

    /// A fourth roll was requested within one turn.
    #[error("turn already used all {limit} rolls")]
    RollLimitExceeded { limit: u8 },

    /// Reroll or fill before the first roll of the turn.
    #[error("dice have not been rolled this turn")]
    NotRolled,

    /// Initial roll requested twice in one turn.
    #[error("dice were already rolled this turn")]
    AlreadyRolled,

    /// Any action after the last category was filled.
    #[error("game is over")]
    GameOver,
}

/// Failure to parse a category name.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct ParseCategoryError(pub String);
