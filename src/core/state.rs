//! Game state: one player's progress through a game.
//!
//! ## GameState
//!
//! - Dice and their held flags
//! - Scorecard
//! - Turn number (1..=13)
//! - Roll number within the turn (0 before the first roll, then 1..=3)
//!
//! Strategies see the state read-only; only the engine mutates it.

use serde::{Deserialize, Serialize};

use super::category::{Category, CATEGORY_COUNT};
use super::config::{GameConfig, MAX_ROLLS};
use super::dice::{DiceSet, Hand};
use super::scorecard::{OpenCategories, Scorecard};

/// Turns in one game.
pub const TURN_COUNT: u8 = CATEGORY_COUNT as u8;

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    dice: DiceSet,
    scorecard: Scorecard,
    turn: u8,
    roll: u8,
}

impl GameState {
    /// State at the start of turn 1.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            dice: DiceSet::new(),
            scorecard: Scorecard::new(config.joker_rule),
            turn: 1,
            roll: 0,
        }
    }

    /// Build a state at an arbitrary point, mainly for strategy tests.
    #[must_use]
    pub fn from_parts(dice: DiceSet, scorecard: Scorecard, turn: u8, roll: u8) -> Self {
        Self {
            dice,
            scorecard,
            turn,
            roll,
        }
    }

    /// Current dice.
    #[must_use]
    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Current die values.
    #[must_use]
    pub fn values(&self) -> &Hand {
        self.dice.values()
    }

    /// The scorecard.
    #[must_use]
    pub fn scorecard(&self) -> &Scorecard {
        &self.scorecard
    }

    /// Turn number (1..=13).
    #[must_use]
    pub fn turn(&self) -> u8 {
        self.turn
    }

    /// Rolls taken this turn (0..=3).
    #[must_use]
    pub fn roll(&self) -> u8 {
        self.roll
    }

    /// Rolls still available this turn.
    #[must_use]
    pub fn rolls_left(&self) -> u8 {
        MAX_ROLLS.saturating_sub(self.roll)
    }

    /// Categories not yet filled.
    #[must_use]
    pub fn open_categories(&self) -> OpenCategories {
        self.scorecard.open_categories()
    }

    /// What filling `category` with the current dice would record.
    #[must_use]
    pub fn potential(&self, category: Category) -> u16 {
        self.scorecard.potential(category, self.dice.values())
    }

    pub(crate) fn dice_mut(&mut self) -> &mut DiceSet {
        &mut self.dice
    }

    pub(crate) fn scorecard_mut(&mut self) -> &mut Scorecard {
        &mut self.scorecard
    }

    pub(crate) fn set_roll(&mut self, roll: u8) {
        self.roll = roll;
    }

    /// Move to the next turn's start.
    pub(crate) fn advance_turn(&mut self) {
        self.turn += 1;
        self.roll = 0;
    }
}
