//! Simulation results and their export formats.
//!
//! - `rows()`: one flat row per completed game, for analysis tooling
//! - `write_csv`: the same rows as CSV
//! - `write_json`: per-strategy summary statistics
//! - `save` / `load`: lossless binary snapshot (bincode)

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Category, GameError, Scorecard, CATEGORY_COUNT};

use super::stats::ScoreStats;

/// Errors writing or reading reports.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary snapshot error: {0}")]
    Bincode(#[from] bincode::Error),
}

/// Outcome of one completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Position of the game within its run.
    pub index: u64,
    /// Seed the game was played with.
    pub seed: u64,
    /// Scorecard total, bonuses included.
    pub final_score: u16,
    /// Value in each category, in scorecard order.
    pub categories: [u16; CATEGORY_COUNT],
    pub upper_bonus: u16,
    pub yahtzee_bonus: u16,
}

impl GameRecord {
    /// Record the final state of a scorecard.
    #[must_use]
    pub fn from_scorecard(index: u64, seed: u64, scorecard: &Scorecard) -> Self {
        let slots = *scorecard.slots();
        Self {
            index,
            seed,
            final_score: scorecard.total(),
            categories: slots.map(|slot| slot.unwrap_or(0)),
            upper_bonus: scorecard.upper_bonus(),
            yahtzee_bonus: scorecard.yahtzee_bonus(),
        }
    }

    /// Value recorded in `category`.
    #[must_use]
    pub fn category(&self, category: Category) -> u16 {
        self.categories[category.index()]
    }
}

/// A game that ended with an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFailure {
    pub index: u64,
    pub seed: u64,
    pub error: GameError,
}

/// Everything one strategy's run produced. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Strategy name.
    pub strategy: String,
    /// Games asked for.
    pub requested: u64,
    /// Statistics over completed games.
    pub stats: ScoreStats,
    /// Completed games in index order (empty if records were disabled).
    pub records: Vec<GameRecord>,
    /// Failed games in index order.
    pub failures: Vec<GameFailure>,
    /// Games never started because the run was cancelled.
    pub skipped: u64,
    /// Whether the run was cancelled before every game started.
    pub cancelled: bool,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl SimulationResult {
    /// Games that reached game over.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.stats.count()
    }

    /// Games that ended with an error.
    #[must_use]
    pub fn failed(&self) -> u64 {
        self.failures.len() as u64
    }

    /// Completed games per second of wall-clock time.
    #[must_use]
    pub fn games_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.completed() as f64 / secs
        }
    }

    /// Compact summary for JSON export and display.
    #[must_use]
    pub fn summary(&self) -> StrategySummary {
        StrategySummary {
            strategy: self.strategy.clone(),
            requested: self.requested,
            completed: self.completed(),
            failed: self.failed(),
            skipped: self.skipped,
            cancelled: self.cancelled,
            mean: self.stats.mean(),
            std_dev: self.stats.std_dev(),
            variance: self.stats.variance(),
            min: self.stats.min(),
            max: self.stats.max(),
            elapsed_ms: self.elapsed.as_millis() as u64,
        }
    }
}

/// Summary statistics for one strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrategySummary {
    pub strategy: String,
    pub requested: u64,
    pub completed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub cancelled: bool,
    pub mean: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub min: Option<u16>,
    pub max: Option<u16>,
    pub elapsed_ms: u64,
}

/// One flat analysis row: a completed game of one strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub strategy: String,
    pub game_index: u64,
    pub seed: u64,
    pub final_score: u16,
    pub categories: [u16; CATEGORY_COUNT],
    pub upper_bonus: u16,
    pub yahtzee_bonus: u16,
}

/// Results of several strategies, keyed by strategy name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    results: BTreeMap<String, SimulationResult>,
}

impl SimulationReport {
    pub fn new(results: BTreeMap<String, SimulationResult>) -> Self {
        Self { results }
    }

    #[must_use]
    pub fn results(&self) -> &BTreeMap<String, SimulationResult> {
        &self.results
    }

    #[must_use]
    pub fn get(&self, strategy: &str) -> Option<&SimulationResult> {
        self.results.get(strategy)
    }

    pub fn into_results(self) -> BTreeMap<String, SimulationResult> {
        self.results
    }

    /// Flat rows, strategies in name order, games in index order.
    #[must_use]
    pub fn rows(&self) -> Vec<ReportRow> {
        self.results
            .values()
            .flat_map(|result| {
                result.records.iter().map(move |record| ReportRow {
                    strategy: result.strategy.clone(),
                    game_index: record.index,
                    seed: record.seed,
                    final_score: record.final_score,
                    categories: record.categories,
                    upper_bonus: record.upper_bonus,
                    yahtzee_bonus: record.yahtzee_bonus,
                })
            })
            .collect()
    }

    /// Per-strategy summaries in name order.
    #[must_use]
    pub fn summaries(&self) -> Vec<StrategySummary> {
        self.results.values().map(SimulationResult::summary).collect()
    }

    /// Write `rows()` as CSV with a header line.
    pub fn write_csv<W: Write>(&self, mut out: W) -> Result<(), ReportError> {
        write!(out, "strategy,game_index,seed,final_score")?;
        for category in Category::ALL {
            write!(out, ",{}", category.name())?;
        }
        writeln!(out, ",upper_bonus,yahtzee_bonus")?;

        for row in self.rows() {
            write!(
                out,
                "{},{},{},{}",
                csv_field(&row.strategy),
                row.game_index,
                row.seed,
                row.final_score
            )?;
            for value in row.categories {
                write!(out, ",{value}")?;
            }
            writeln!(out, ",{},{}", row.upper_bonus, row.yahtzee_bonus)?;
        }
        out.flush()?;
        Ok(())
    }

    /// Pretty-printed JSON array of per-strategy summaries.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(&self.summaries())?)
    }

    /// Write [`to_json`](Self::to_json) output.
    pub fn write_json<W: Write>(&self, out: W) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(out, &self.summaries())?;
        Ok(())
    }

    /// Binary snapshot of the full report.
    pub fn save<W: Write>(&self, out: W) -> Result<(), ReportError> {
        bincode::serialize_into(out, self)?;
        Ok(())
    }

    /// Read a snapshot written by [`save`](Self::save).
    pub fn load<R: Read>(input: R) -> Result<Self, ReportError> {
        Ok(bincode::deserialize_from(input)?)
    }
}

impl From<BTreeMap<String, SimulationResult>> for SimulationReport {
    fn from(results: BTreeMap<String, SimulationResult>) -> Self {
        Self::new(results)
    }
}

/// Quote a CSV field when it holds a separator, quote or newline.
fn csv_field(value: &str) -> std::borrow::Cow<'_, str> {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\"")).into()
    } else {
        value.into()
    }
}
