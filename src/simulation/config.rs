//! Simulation run configuration.

use serde::{Deserialize, Serialize};

use crate::core::GameConfig;

/// Environment variable holding the base seed.
pub const SEED_VAR: &str = "YAHTZEE_SEED";

/// Environment variable holding the worker thread count.
pub const THREADS_VAR: &str = "YAHTZEE_THREADS";

/// Rayon's own thread count variable, used when `YAHTZEE_THREADS` is unset.
pub const RAYON_THREADS_VAR: &str = "RAYON_NUM_THREADS";

/// Configuration for a batch of simulated games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Base seed. Game `i` plays with `GameRng::for_game(seed, i)`.
    pub seed: u64,

    /// Run games on rayon workers rather than the calling thread.
    pub parallel: bool,

    /// Size of a dedicated worker pool. `None` uses rayon's global pool.
    pub threads: Option<usize>,

    /// Rules every game is played under.
    pub game: GameConfig,

    /// Keep one record per game in the result (statistics are always kept).
    pub keep_records: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            parallel: true,
            threads: None,
            game: GameConfig::default(),
            keep_records: true,
        }
    }
}

impl SimulationConfig {
    /// Create a new simulation config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `YAHTZEE_SEED` and `YAHTZEE_THREADS`
    /// (falling back to `RAYON_NUM_THREADS`).
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(seed) = parse_var(&lookup, SEED_VAR) {
            config.seed = seed;
        }
        let threads = parse_var::<usize>(&lookup, THREADS_VAR)
            .or_else(|| parse_var(&lookup, RAYON_THREADS_VAR));
        if let Some(threads) = threads.filter(|&n| n > 0) {
            config.threads = Some(threads);
        }
        config
    }

    /// Set the base seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable parallel execution.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Use a dedicated pool of `threads` workers.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Set the game rules.
    #[must_use]
    pub fn with_game_config(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Keep or drop per-game records.
    #[must_use]
    pub fn with_records(mut self, keep: bool) -> Self {
        self.keep_records = keep;
        self
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::JokerRule;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.seed, 0);
        assert!(config.parallel);
        assert_eq!(config.threads, None);
        assert!(config.keep_records);
    }

    #[test]
    fn test_builder() {
        let config = SimulationConfig::new()
            .with_seed(7)
            .with_parallel(false)
            .with_threads(3)
            .with_records(false)
            .with_game_config(GameConfig::new().with_joker_rule(JokerRule::Disabled));

        assert_eq!(config.seed, 7);
        assert!(!config.parallel);
        assert_eq!(config.threads, Some(3));
        assert!(!config.keep_records);
        assert_eq!(config.game.joker_rule, JokerRule::Disabled);
    }

    #[test]
    fn test_env_overrides() {
        let config = SimulationConfig::from_lookup(vars(&[(SEED_VAR, "99"), (THREADS_VAR, "4")]));
        assert_eq!(config.seed, 99);
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn test_env_rayon_fallback() {
        let config = SimulationConfig::from_lookup(vars(&[(RAYON_THREADS_VAR, "2")]));
        assert_eq!(config.threads, Some(2));

        let config = SimulationConfig::from_lookup(vars(&[
            (THREADS_VAR, "6"),
            (RAYON_THREADS_VAR, "2"),
        ]));
        assert_eq!(config.threads, Some(6));
    }

    #[test]
    fn test_env_invalid_ignored() {
        let config = SimulationConfig::from_lookup(vars(&[(SEED_VAR, "abc"), (THREADS_VAR, "0")]));
        assert_eq!(config, SimulationConfig::default());
    }
}
