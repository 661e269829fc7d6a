//! Batch simulation of independent games.
//!
//! Each game gets a fresh engine and its own RNG derived from the base seed
//! and the game index. Games are played (in parallel when configured), their
//! outcomes collected in index order, then folded into one result on the
//! calling thread. Scheduling therefore never affects the numbers.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::core::GameRng;
use crate::engine::GameEngine;
use crate::strategy::Strategy;

use super::config::SimulationConfig;
use super::report::{GameFailure, GameRecord, SimulationResult};
use super::stats::ScoreStats;

/// Shared flag that stops a run from starting further games.
///
/// Games already in progress finish normally.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What happened to one game index.
#[derive(Clone, Debug)]
enum GameOutcome {
    Completed(GameRecord),
    Failed(GameFailure),
    Skipped,
}

/// Runs batches of games for one or more strategies.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    config: SimulationConfig,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play `game_count` games with `strategy`.
    pub fn run(&self, strategy: &dyn Strategy, game_count: usize) -> SimulationResult {
        self.run_with_cancel(strategy, game_count, &CancelToken::new())
    }

    /// Like [`run`](Self::run), stopping early once `cancel` is set.
    ///
    /// Games not yet started when the token is set are counted as skipped.
    pub fn run_with_cancel(
        &self,
        strategy: &dyn Strategy,
        game_count: usize,
        cancel: &CancelToken,
    ) -> SimulationResult {
        let start = Instant::now();

        let outcomes = self.play_all(strategy, game_count, cancel);

        let mut stats = ScoreStats::new();
        let mut records = Vec::with_capacity(if self.config.keep_records { game_count } else { 0 });
        let mut failures = Vec::new();
        let mut skipped = 0u64;

        for outcome in outcomes {
            match outcome {
                GameOutcome::Completed(record) => {
                    stats.push(record.final_score);
                    if self.config.keep_records {
                        records.push(record);
                    }
                }
                GameOutcome::Failed(failure) => failures.push(failure),
                GameOutcome::Skipped => skipped += 1,
            }
        }

        let result = SimulationResult {
            strategy: strategy.name().to_string(),
            requested: game_count as u64,
            stats,
            records,
            failures,
            skipped,
            cancelled: skipped > 0,
            elapsed: start.elapsed(),
        };

        if result.cancelled {
            warn!(
                "{}: cancelled, {} of {} games skipped",
                result.strategy, result.skipped, result.requested
            );
        }
        info!(
            "{}: {} games in {:.2?} (mean {:.2}, std dev {:.2}, {} failed)",
            result.strategy,
            result.completed(),
            result.elapsed,
            result.stats.mean(),
            result.stats.std_dev(),
            result.failed()
        );

        result
    }

    /// Run every strategy in turn, keyed by strategy name.
    pub fn run_many(
        &self,
        strategies: &[Arc<dyn Strategy>],
        game_count: usize,
    ) -> BTreeMap<String, SimulationResult> {
        self.run_many_with_cancel(strategies, game_count, &CancelToken::new())
    }

    /// Like [`run_many`](Self::run_many) with a shared cancel token.
    pub fn run_many_with_cancel(
        &self,
        strategies: &[Arc<dyn Strategy>],
        game_count: usize,
        cancel: &CancelToken,
    ) -> BTreeMap<String, SimulationResult> {
        let mut results = BTreeMap::new();
        for strategy in strategies {
            let result = self.run_with_cancel(strategy.as_ref(), game_count, cancel);
            if results.contains_key(&result.strategy) {
                warn!("{}: duplicate strategy name, replacing earlier result", result.strategy);
            }
            results.insert(result.strategy.clone(), result);
        }
        results
    }

    fn play_all(&self, strategy: &dyn Strategy, game_count: usize, cancel: &CancelToken) -> Vec<GameOutcome> {
        let play = |index: usize| {
            if cancel.is_cancelled() {
                GameOutcome::Skipped
            } else {
                self.play_one(strategy, index as u64)
            }
        };

        if !self.config.parallel {
            return (0..game_count).map(play).collect();
        }

        if let Some(threads) = self.config.threads {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => {
                    return pool.install(|| (0..game_count).into_par_iter().map(play).collect());
                }
                Err(e) => warn!("Could not build {threads}-thread pool ({e}), using global pool"),
            }
        }

        (0..game_count).into_par_iter().map(play).collect()
    }

    fn play_one(&self, strategy: &dyn Strategy, index: u64) -> GameOutcome {
        let seed = GameRng::game_seed(self.config.seed, index);
        let mut engine = GameEngine::with_rng(&self.config.game, GameRng::new(seed));

        match engine.play_game(strategy) {
            Ok(_) => GameOutcome::Completed(GameRecord::from_scorecard(
                index,
                seed,
                engine.state().scorecard(),
            )),
            Err(error) => {
                debug!("{}: game {index} (seed {seed}) failed: {error}", strategy.name());
                GameOutcome::Failed(GameFailure { index, seed, error })
            }
        }
    }
}
