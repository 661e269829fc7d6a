//! # yahtzee-sim
//!
//! A Yahtzee game engine and strategy simulation harness.
//!
//! ## Design Principles
//!
//! 1. **Rules in one place**: Scoring, bonuses and the joker rule live in
//!    `core`. The engine, strategies and the CLI only ever ask the scorecard.
//!
//! 2. **Strategies are pluggable**: The engine talks to `dyn Strategy` and
//!    nothing else. Strategies are stateless and shared across threads.
//!
//! 3. **Reproducible by seed**: Every game owns a `GameRng` derived from the
//!    run seed and the game index. Serial and parallel runs agree exactly.
//!
//! ## Architecture
//!
//! - **Turn state machine**: `GameEngine` enforces roll limits and phase
//!   order. Interactive play and simulated play use the same transitions.
//!
//! - **Failures are local**: A game that errors is recorded as failed; the
//!   rest of the run is unaffected.
//!
//! ## Modules
//!
//! - `core`: Dice, categories, scoring, scorecard, game state, RNG, configuration
//! - `strategy`: The `Strategy` trait and the built-in strategies
//! - `engine`: Turn state machine for one game
//! - `simulation`: Batch runs, statistics, reports and export

pub mod core;
pub mod engine;
pub mod simulation;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    Category, DiceSet, DiceStateError, Fill, GameConfig, GameError, GameRng, GameState, Hand,
    HoldMask, JokerRule, Scorecard, MAX_TOTAL_SCORE,
};

pub use crate::engine::{GameEngine, TurnPhase, TurnRecord};

pub use crate::strategy::{
    ExpectedValueStrategy, ParseStrategyError, RandomStrategy, RuleBasedStrategy, Strategy,
    StrategyKind,
};

pub use crate::simulation::{
    CancelToken, GameFailure, GameRecord, ReportError, ScoreStats, SimulationConfig,
    SimulationReport, SimulationResult, Simulator,
};
