//! Core game types: dice, categories, scoring, scorecard, state, RNG, configuration.
//!
//! Everything here is independent of how decisions are made. Strategies and
//! the engine build on these types.

pub mod category;
pub mod config;
pub mod dice;
pub mod error;
pub mod rng;
pub mod scorecard;
pub mod scoring;
pub mod state;

pub use category::{Category, CATEGORY_COUNT};
pub use config::{GameConfig, JokerRule, MAX_ROLLS};
pub use dice::{face_counts, validate_hand, DiceSet, Hand, HoldMask, DICE_COUNT};
pub use error::{DiceStateError, GameError, ParseCategoryError};
pub use rng::GameRng;
pub use scorecard::{Fill, OpenCategories, Scorecard};
pub use scoring::{score, MAX_TOTAL_SCORE};
pub use state::{GameState, TURN_COUNT};
