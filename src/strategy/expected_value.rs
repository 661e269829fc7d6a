//! One-turn expected-value strategy.
//!
//! Rerolls maximise the expected best immediate score at the end of the
//! current turn, computed exactly over the keep tables. Category choice adds
//! small adjustments for the upper bonus and for wasting the Yahtzee box.
//!
//! This looks only one turn ahead. It plays far better than the greedy
//! heuristic but is not optimal over a whole game.

use crate::core::{
    scoring::{UPPER_BONUS, UPPER_BONUS_THRESHOLD},
    Category, GameError, GameRng, GameState, Hand, HoldMask, Scorecard,
};

use super::keep_table::KeepTable;
use super::traits::Strategy;

/// Expected-value maximising strategy.
#[derive(Clone, Debug)]
pub struct ExpectedValueStrategy {
    table: KeepTable,
    /// Credit for a fill that pushes the upper subtotal to the threshold.
    upper_bonus_credit: f64,
    /// Cost of scoring zero in Yahtzee while other boxes are open.
    yahtzee_zero_penalty: f64,
}

impl Default for ExpectedValueStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpectedValueStrategy {
    /// Build the strategy and its tables.
    pub fn new() -> Self {
        Self {
            table: KeepTable::new(),
            upper_bonus_credit: f64::from(UPPER_BONUS),
            yahtzee_zero_penalty: 20.0,
        }
    }

    #[must_use]
    pub fn with_upper_bonus_credit(mut self, credit: f64) -> Self {
        self.upper_bonus_credit = credit;
        self
    }

    #[must_use]
    pub fn with_yahtzee_zero_penalty(mut self, penalty: f64) -> Self {
        self.yahtzee_zero_penalty = penalty;
        self
    }

    /// Value of ending the turn with each hand, indexed by hand id.
    fn final_values(&self, scorecard: &Scorecard) -> Vec<f64> {
        let open = scorecard.open_categories();
        self.table
            .hands()
            .iter()
            .map(|hand| {
                let best = open
                    .iter()
                    .map(|&c| self.fill_value(scorecard, c, hand, open.len()))
                    .fold(f64::NEG_INFINITY, f64::max);
                best + f64::from(scorecard.pending_yahtzee_bonus(hand))
            })
            .collect()
    }

    /// Adjusted value of filling `category` with `dice`.
    fn fill_value(&self, scorecard: &Scorecard, category: Category, dice: &Hand, open: usize) -> f64 {
        let points = scorecard.potential(category, dice);
        let mut value = f64::from(points);

        if category.is_upper() {
            let before = scorecard.upper_subtotal();
            if before < UPPER_BONUS_THRESHOLD && before + points >= UPPER_BONUS_THRESHOLD {
                value += self.upper_bonus_credit;
            }
        }
        if category == Category::Yahtzee && points == 0 && open > 1 {
            value -= self.yahtzee_zero_penalty;
        }
        value
    }

    /// Expected end-of-turn value of holding `mask`, with `rolls_left` rolls
    /// still available.
    #[must_use]
    pub fn hold_value(&self, state: &GameState, mask: HoldMask) -> f64 {
        let final_values = self.final_values(state.scorecard());
        let keep_values = self.keep_values(&final_values, state.rolls_left());
        keep_values[self.table.keep_id(state.values(), mask)]
    }

    /// Expected value per keep id with `rolls_left` rerolls remaining.
    fn keep_values(&self, final_values: &[f64], rolls_left: u8) -> Vec<f64> {
        let mut keep_values = self.table.expect_all(final_values);
        for _ in 1..rolls_left {
            let hand_values = self.table.best_keep(&keep_values);
            keep_values = self.table.expect_all(&hand_values);
        }
        keep_values
    }
}

impl Strategy for ExpectedValueStrategy {
    fn name(&self) -> &str {
        "expected_value"
    }

    fn choose_reroll(&self, state: &GameState, _rng: &mut GameRng) -> HoldMask {
        if state.rolls_left() == 0 || state.open_categories().is_empty() {
            return HoldMask::all();
        }

        let final_values = self.final_values(state.scorecard());
        let keep_values = self.keep_values(&final_values, state.rolls_left());
        let dice = state.values();

        // Hold-all first so equal values stop rolling
        let mut best = HoldMask::all();
        let mut best_value = keep_values[self.table.keep_id(dice, best)];
        for mask in HoldMask::every() {
            let value = keep_values[self.table.keep_id(dice, mask)];
            if value > best_value + 1e-9 {
                best = mask;
                best_value = value;
            }
        }
        best
    }

    fn choose_category(&self, state: &GameState, _rng: &mut GameRng) -> Result<Category, GameError> {
        let scorecard = state.scorecard();
        let open = scorecard.open_categories();

        open.iter()
            .map(|&c| (c, self.fill_value(scorecard, c, state.values(), open.len())))
            .fold(None, |best: Option<(Category, f64)>, (c, v)| match best {
                Some((_, bv)) if bv >= v => best,
                _ => Some((c, v)),
            })
            .map(|(category, _)| category)
            .ok_or(GameError::NoOpenCategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceSet;

    fn state_with(dice: Hand, scorecard: Scorecard, roll: u8) -> GameState {
        GameState::from_parts(DiceSet::from_values(dice).unwrap(), scorecard, 1, roll)
    }

    #[test]
    fn test_keeps_made_yahtzee() {
        let strategy = ExpectedValueStrategy::new();
        let state = state_with([4, 4, 4, 4, 4], Scorecard::default(), 1);
        assert_eq!(strategy.choose_reroll(&state, &mut GameRng::new(0)), HoldMask::all());
        assert_eq!(
            strategy.choose_category(&state, &mut GameRng::new(0)),
            Ok(Category::Yahtzee)
        );
    }

    #[test]
    fn test_keeps_four_of_a_kind_toward_yahtzee() {
        let strategy = ExpectedValueStrategy::new();
        let mut scorecard = Scorecard::default();
        for &c in &[
            Category::Chance,
            Category::ThreeOfAKind,
            Category::FourOfAKind,
            Category::FullHouse,
            Category::SmallStraight,
            Category::LargeStraight,
        ] {
            scorecard.fill(c, &[1, 2, 3, 4, 6]).unwrap();
        }
        let state = state_with([6, 6, 1, 6, 6], scorecard, 2);

        let hold = strategy.choose_reroll(&state, &mut GameRng::new(0));
        assert_eq!(hold, HoldMask::from_indices(&[0, 1, 3, 4]).unwrap());
    }

    #[test]
    fn test_hold_value_matches_best_choice() {
        let strategy = ExpectedValueStrategy::new();
        let state = state_with([1, 3, 5, 6, 6], Scorecard::default(), 1);
        let chosen = strategy.choose_reroll(&state, &mut GameRng::new(0));
        let chosen_value = strategy.hold_value(&state, chosen);

        for mask in HoldMask::every() {
            assert!(strategy.hold_value(&state, mask) <= chosen_value + 1e-9);
        }
    }

    #[test]
    fn test_avoids_zero_yahtzee() {
        let strategy = ExpectedValueStrategy::new();
        let mut scorecard = Scorecard::default();
        for &c in &Category::UPPER {
            scorecard.fill(c, &[1, 1, 1, 1, 1]).unwrap();
        }
        for &c in &[Category::ThreeOfAKind, Category::FourOfAKind, Category::FullHouse] {
            scorecard.fill(c, &[1, 2, 3, 4, 6]).unwrap();
        }
        scorecard.fill(Category::Chance, &[1, 2, 3, 4, 6]).unwrap();
        let state = state_with([1, 2, 2, 5, 6], scorecard, 3);

        // All three open boxes score zero; Yahtzee carries the penalty
        let category = strategy.choose_category(&state, &mut GameRng::new(0)).unwrap();
        assert_ne!(category, Category::Yahtzee);
    }

    #[test]
    fn test_upper_bonus_credit() {
        let strategy = ExpectedValueStrategy::new();
        let mut scorecard = Scorecard::default();
        // 4 + 12 + 15 + 18 = 49 upper, needs 14 more: four fives is 20
        scorecard.fill(Category::Twos, &[2, 2, 1, 1, 1]).unwrap();
        scorecard.fill(Category::Fours, &[4, 4, 4, 1, 1]).unwrap();
        scorecard.fill(Category::Threes, &[3, 3, 3, 3, 3]).unwrap();
        scorecard.fill(Category::Sixes, &[6, 6, 6, 1, 1]).unwrap();
        let state = state_with([5, 5, 5, 5, 1], scorecard, 3);

        // Fives (20 + 35) beats Four of a Kind (21) and Chance (21)
        assert_eq!(
            strategy.choose_category(&state, &mut GameRng::new(0)),
            Ok(Category::Fives)
        );
    }

    #[test]
    fn test_no_open_category() {
        let strategy = ExpectedValueStrategy::new();
        let mut scorecard = Scorecard::default();
        for &c in &Category::ALL {
            scorecard.fill(c, &[1, 2, 3, 4, 5]).unwrap();
        }
        let state = state_with([1, 2, 3, 4, 5], scorecard, 3);
        assert_eq!(
            strategy.choose_category(&state, &mut GameRng::new(0)),
            Err(GameError::NoOpenCategory)
        );
        assert_eq!(strategy.choose_reroll(&state, &mut GameRng::new(0)), HoldMask::all());
    }
}
