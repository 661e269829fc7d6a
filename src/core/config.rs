//! Game configuration.
//!
//! House rules that change scoring are configured here rather than hardcoded
//! in the scorecard.

use serde::{Deserialize, Serialize};

/// Rolls allowed per turn.
pub const MAX_ROLLS: u8 = 3;

/// How a Yahtzee rolled after the Yahtzee box is filled is scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JokerRule {
    /// Hasbro bonus and joker scoring, free-choice placement.
    ///
    /// - +100 when the Yahtzee box already holds 50
    /// - Full House, Small and Large Straight score their fixed value
    /// - Any open category may be filled
    #[default]
    Hasbro,

    /// Extra Yahtzees score like any other hand.
    Disabled,
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Joker and Yahtzee bonus convention.
    pub joker_rule: JokerRule,
}

impl GameConfig {
    /// Create a configuration with standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the joker rule.
    #[must_use]
    pub fn with_joker_rule(mut self, rule: JokerRule) -> Self {
        self.joker_rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_hasbro() {
        assert_eq!(GameConfig::new().joker_rule, JokerRule::Hasbro);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new().with_joker_rule(JokerRule::Disabled);
        assert_eq!(config.joker_rule, JokerRule::Disabled);
    }
}
