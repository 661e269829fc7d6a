//! Simulation harness integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use yahtzee_sim::core::{GameRng, GameState, HoldMask};
use yahtzee_sim::simulation::{ReportRow, ScoreStats};
use yahtzee_sim::{
    CancelToken, Category, GameError, RandomStrategy, RuleBasedStrategy, SimulationConfig,
    SimulationReport, Simulator, Strategy, MAX_TOTAL_SCORE,
};

fn serial(seed: u64) -> Simulator {
    Simulator::new(SimulationConfig::new().with_seed(seed).with_parallel(false))
}

// =============================================================================
// Basic Runs
// =============================================================================

#[test]
fn test_random_thousand_games() {
    let result = Simulator::new(SimulationConfig::new().with_seed(1)).run(&RandomStrategy, 1000);

    assert_eq!(result.records.len(), 1000);
    assert_eq!(result.completed(), 1000);
    assert_eq!(result.failed(), 0);
    for record in &result.records {
        assert!(record.final_score <= MAX_TOTAL_SCORE);
    }
}

#[test]
fn test_mean_stable_across_seeds() {
    let means: Vec<f64> = (0..4)
        .map(|seed| serial(seed * 1000).run(&RandomStrategy, 1000).stats.mean())
        .collect();

    let overall = means.iter().sum::<f64>() / means.len() as f64;
    for mean in &means {
        // Random-play std dev is about 20, so 1000-game means sit well within 5
        assert!((mean - overall).abs() < 5.0, "means {means:?}");
    }
}

#[test]
fn test_stats_match_records() {
    let result = serial(12).run(&RuleBasedStrategy::new(), 100);
    let recomputed: ScoreStats = result.records.iter().map(|r| r.final_score).collect();

    assert_eq!(result.stats.count(), recomputed.count());
    assert!((result.stats.mean() - recomputed.mean()).abs() < 1e-9);
    assert_eq!(result.stats.min(), recomputed.min());
    assert_eq!(result.stats.max(), recomputed.max());
}

#[test]
fn test_record_totals_add_up() {
    let result = serial(4).run(&RuleBasedStrategy::new(), 50);
    for record in &result.records {
        let categories: u16 = record.categories.iter().sum();
        assert_eq!(
            record.final_score,
            categories + record.upper_bonus + record.yahtzee_bonus
        );
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_serial_equals_parallel() {
    let config = SimulationConfig::new().with_seed(77);
    let serial = Simulator::new(config.clone().with_parallel(false)).run(&RandomStrategy, 300);
    let parallel = Simulator::new(config.clone()).run(&RandomStrategy, 300);
    let pooled = Simulator::new(config.with_threads(3)).run(&RandomStrategy, 300);

    assert_eq!(serial.records, parallel.records);
    assert_eq!(serial.records, pooled.records);
    assert_eq!(serial.stats.count(), parallel.stats.count());
    assert_eq!(serial.stats.mean(), parallel.stats.mean());
    assert_eq!(serial.stats.variance(), pooled.stats.variance());
}

// =============================================================================
// Failures and Cancellation
// =============================================================================

/// Fails every third game by refilling a used category on turn 2.
struct Flaky {
    games: AtomicUsize,
}

impl Strategy for Flaky {
    fn name(&self) -> &str {
        "flaky"
    }

    fn choose_reroll(&self, _state: &GameState, _rng: &mut GameRng) -> HoldMask {
        HoldMask::all()
    }

    fn choose_category(&self, state: &GameState, _rng: &mut GameRng) -> Result<Category, GameError> {
        if state.turn() == 2 && self.games.fetch_add(1, Ordering::Relaxed) % 3 == 0 {
            return Ok(filled_category(state));
        }
        state.open_categories().first().copied().ok_or(GameError::NoOpenCategory)
    }
}

/// Some category that is already filled.
fn filled_category(state: &GameState) -> Category {
    Category::ALL
        .into_iter()
        .find(|&c| state.scorecard().is_filled(c))
        .unwrap_or(Category::Chance)
}

#[test]
fn test_failed_games_are_counted_not_aggregated() {
    let strategy = Flaky {
        games: AtomicUsize::new(0),
    };
    let result = serial(0).run(&strategy, 30);

    assert_eq!(result.failed(), 10);
    assert_eq!(result.completed(), 20);
    assert_eq!(result.records.len(), 20);
    for failure in &result.failures {
        assert!(matches!(failure.error, GameError::CategoryAlreadyFilled(_)));
    }
    assert_eq!(result.completed() + result.failed(), result.requested);
}

/// Cancels the shared token after a fixed number of category choices.
struct CancelAfter {
    token: CancelToken,
    remaining: AtomicUsize,
}

impl Strategy for CancelAfter {
    fn name(&self) -> &str {
        "cancel_after"
    }

    fn choose_reroll(&self, _state: &GameState, _rng: &mut GameRng) -> HoldMask {
        HoldMask::all()
    }

    fn choose_category(&self, state: &GameState, _rng: &mut GameRng) -> Result<Category, GameError> {
        if self.remaining.fetch_sub(1, Ordering::Relaxed) == 1 {
            self.token.cancel();
        }
        state.open_categories().first().copied().ok_or(GameError::NoOpenCategory)
    }
}

#[test]
fn test_cancelled_run_accounts_for_every_game() {
    let token = CancelToken::new();
    let strategy = CancelAfter {
        token: token.clone(),
        // Cancel during the fifth game
        remaining: AtomicUsize::new(13 * 4 + 3),
    };

    let result = serial(0).run_with_cancel(&strategy, 20, &token);

    assert!(result.cancelled);
    assert_eq!(result.completed(), 5);
    assert_eq!(result.skipped, 15);
    assert_eq!(result.completed() + result.failed() + result.skipped, result.requested);
}

#[test]
fn test_cancelled_parallel_run_accounts_for_every_game() {
    let token = CancelToken::new();
    let strategy = CancelAfter {
        token: token.clone(),
        remaining: AtomicUsize::new(13 * 10),
    };

    let result = Simulator::new(SimulationConfig::new().with_threads(2))
        .run_with_cancel(&strategy, 2000, &token);

    assert_eq!(result.completed() + result.failed() + result.skipped, result.requested);
    assert!(result.completed() >= 10);
}

// =============================================================================
// Reports
// =============================================================================

#[test]
fn test_run_many_report_rows() {
    let strategies: Vec<Arc<dyn Strategy>> =
        vec![Arc::new(RuleBasedStrategy::new()), Arc::new(RandomStrategy)];
    let report = SimulationReport::new(serial(9).run_many(&strategies, 25));

    let rows: Vec<ReportRow> = report.rows();
    assert_eq!(rows.len(), 50);
    assert!(rows[..25].iter().all(|r| r.strategy == "random"));
    assert!(rows[25..].iter().all(|r| r.strategy == "rule_based"));
    assert_eq!(rows[0].game_index, 0);
    assert_eq!(rows[24].game_index, 24);

    let random = report.get("random").unwrap();
    assert_eq!(rows[3].final_score, random.records[3].final_score);
}

#[test]
fn test_report_exports() {
    let strategies: Vec<Arc<dyn Strategy>> = vec![Arc::new(RandomStrategy)];
    let report = SimulationReport::new(serial(2).run_many(&strategies, 10));

    let mut csv = Vec::new();
    report.write_csv(&mut csv).unwrap();
    assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 11);

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json[0]["strategy"], "random");
    assert_eq!(json[0]["completed"], 10);

    let mut bytes = Vec::new();
    report.save(&mut bytes).unwrap();
    assert_eq!(SimulationReport::load(bytes.as_slice()).unwrap(), report);
}
