//! Uniformly random play.

use crate::core::{Category, GameError, GameRng, GameState, HoldMask};

use super::traits::Strategy;

/// Holds a uniformly random subset of dice and fills a uniformly random open
/// category. Useful as a baseline.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl RandomStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_reroll(&self, _state: &GameState, rng: &mut GameRng) -> HoldMask {
        // All 32 masks equally likely, hold-all (stop) included
        HoldMask::from_bits(rng.gen_range_usize(0..32) as u8)
    }

    fn choose_category(&self, state: &GameState, rng: &mut GameRng) -> Result<Category, GameError> {
        let open = state.open_categories();
        rng.choose(&open).copied().ok_or(GameError::NoOpenCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DiceSet, GameConfig, Scorecard};

    #[test]
    fn test_picks_open_category() {
        let mut scorecard = Scorecard::default();
        for &category in &Category::ALL[..12] {
            scorecard.fill(category, &[1, 2, 3, 4, 5]).unwrap();
        }
        let state = GameState::from_parts(DiceSet::new(), scorecard, 13, 3);
        let mut rng = GameRng::new(1);

        for _ in 0..10 {
            assert_eq!(
                RandomStrategy.choose_category(&state, &mut rng),
                Ok(Category::Chance)
            );
        }
    }

    #[test]
    fn test_complete_scorecard_fails() {
        let mut scorecard = Scorecard::default();
        for &category in &Category::ALL {
            scorecard.fill(category, &[1, 2, 3, 4, 5]).unwrap();
        }
        let state = GameState::from_parts(DiceSet::new(), scorecard, 13, 3);

        assert_eq!(
            RandomStrategy.choose_category(&state, &mut GameRng::new(1)),
            Err(GameError::NoOpenCategory)
        );
    }

    #[test]
    fn test_reroll_masks_vary() {
        let state = GameState::new(&GameConfig::default());
        let mut rng = GameRng::new(9);

        let masks: std::collections::HashSet<_> = (0..200)
            .map(|_| RandomStrategy.choose_reroll(&state, &mut rng).bits())
            .collect();

        assert!(masks.len() > 20);
    }
}
