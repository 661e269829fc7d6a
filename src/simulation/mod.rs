//! Strategy evaluation by batch simulation.
//!
//! A `Simulator` plays many independent games per strategy and aggregates
//! them into a `SimulationResult`. Several strategies together form a
//! `SimulationReport`, which exports to CSV, JSON and a binary snapshot.

mod config;
mod report;
mod simulator;
mod stats;

pub use config::{SimulationConfig, RAYON_THREADS_VAR, SEED_VAR, THREADS_VAR};
pub use report::{
    GameFailure, GameRecord, ReportError, ReportRow, SimulationReport, SimulationResult,
    StrategySummary,
};
pub use simulator::{CancelToken, Simulator};
pub use stats::ScoreStats;
