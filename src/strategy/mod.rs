//! Decision procedures: which dice to hold, which category to fill.
//!
//! - `RandomStrategy`: uniform choices, a baseline
//! - `RuleBasedStrategy`: greedy heuristic with a fixed tie-break order
//! - `ExpectedValueStrategy`: exact one-turn expectation over keep tables

mod expected_value;
mod keep_table;
mod random;
mod rule_based;
mod traits;

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

pub use expected_value::ExpectedValueStrategy;
pub use keep_table::{KeepTable, HAND_COUNT, KEEP_COUNT};
pub use random::RandomStrategy;
pub use rule_based::{RuleBasedStrategy, DEFAULT_PRIORITY};
pub use traits::Strategy;

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy: {0} (expected random, rule-based or expected-value)")]
pub struct ParseStrategyError(pub String);

/// The built-in strategies, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StrategyKind {
    Random,
    RuleBased,
    ExpectedValue,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Random,
        StrategyKind::RuleBased,
        StrategyKind::ExpectedValue,
    ];

    /// Build a shareable instance.
    #[must_use]
    pub fn build(self) -> Arc<dyn Strategy> {
        match self {
            StrategyKind::Random => Arc::new(RandomStrategy::new()),
            StrategyKind::RuleBased => Arc::new(RuleBasedStrategy::new()),
            StrategyKind::ExpectedValue => Arc::new(ExpectedValueStrategy::new()),
        }
    }

    /// Name the built strategy reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::RuleBased => "rule_based",
            StrategyKind::ExpectedValue => "expected_value",
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "random" => Ok(StrategyKind::Random),
            "rulebased" | "rules" | "greedy" => Ok(StrategyKind::RuleBased),
            "expectedvalue" | "ev" => Ok(StrategyKind::ExpectedValue),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}
