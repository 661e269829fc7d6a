//! Streaming score statistics.

use serde::{Deserialize, Serialize};

/// Count, mean, variance, min and max of a stream of scores.
///
/// Uses Welford's update, so a single pass is numerically stable. Two
/// accumulators merge into the statistics of the concatenated streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreStats {
    count: u64,
    mean: f64,
    /// Sum of squared deviations from the mean.
    m2: f64,
    min: Option<u16>,
    max: Option<u16>,
}

impl ScoreStats {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one score.
    pub fn push(&mut self, score: u16) {
        self.count += 1;
        let x = f64::from(score);
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.min = Some(self.min.map_or(score, |m| m.min(score)));
        self.max = Some(self.max.map_or(score, |m| m.max(score)));
    }

    /// Combine with statistics gathered over a disjoint stream.
    pub fn merge(&mut self, other: &ScoreStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }

        let count = self.count + other.count;
        let delta = other.mean - self.mean;
        let (n_a, n_b) = (self.count as f64, other.count as f64);

        self.mean += delta * n_b / count as f64;
        self.m2 += other.m2 + delta * delta * n_a * n_b / count as f64;
        self.count = count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Number of scores seen.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean score (0 when empty).
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population variance (0 when empty).
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.m2 / self.count as f64
        }
    }

    /// Population standard deviation.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Lowest score, if any.
    #[must_use]
    pub fn min(&self) -> Option<u16> {
        self.min
    }

    /// Highest score, if any.
    #[must_use]
    pub fn max(&self) -> Option<u16> {
        self.max
    }
}

impl FromIterator<u16> for ScoreStats {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut stats = Self::new();
        for score in iter {
            stats.push(score);
        }
        stats
    }
}

impl Extend<u16> for ScoreStats {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for score in iter {
            self.push(score);
        }
    }
}
