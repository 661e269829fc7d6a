//! Deterministic greedy heuristic.
//!
//! Reroll: find the open category the dice are currently worth the most in
//! and hold the dice that contribute to it. Made patterns with a fixed value
//! are held whole. When nothing scores, chase the most common face.
//!
//! Category: the open category with the highest immediate score.
//!
//! Ties are broken by a fixed priority order, Yahtzee first, then the upper
//! section, then the rest of the lower section.

use crate::core::{scoring, Category, GameError, GameRng, GameState, Hand, HoldMask, CATEGORY_COUNT};

use super::traits::Strategy;

/// Default tie-break order, most preferred first.
pub const DEFAULT_PRIORITY: [Category; CATEGORY_COUNT] = [
    Category::Yahtzee,
    Category::Ones,
    Category::Twos,
    Category::Threes,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
    Category::ThreeOfAKind,
    Category::FourOfAKind,
    Category::FullHouse,
    Category::SmallStraight,
    Category::LargeStraight,
    Category::Chance,
];

/// Greedy rule-based strategy.
#[derive(Clone, Debug)]
pub struct RuleBasedStrategy {
    /// Rank of each category (index by `Category::index`), lower wins ties.
    rank: [u8; CATEGORY_COUNT],
}

impl Default for RuleBasedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleBasedStrategy {
    /// Strategy with the default tie-break order.
    pub fn new() -> Self {
        Self::with_priority(DEFAULT_PRIORITY)
    }

    /// Strategy with a custom tie-break order, most preferred first.
    ///
    /// Panics if `order` is not a permutation of all thirteen categories.
    pub fn with_priority(order: [Category; CATEGORY_COUNT]) -> Self {
        let mut rank = [u8::MAX; CATEGORY_COUNT];
        for (position, category) in order.iter().enumerate() {
            assert!(
                rank[category.index()] == u8::MAX,
                "Category {category} appears twice in priority order"
            );
            rank[category.index()] = position as u8;
        }
        Self { rank }
    }

    /// Tie-break rank of a category (0 = most preferred).
    #[must_use]
    pub fn rank(&self, category: Category) -> u8 {
        self.rank[category.index()]
    }

    /// Open category with the highest immediate score, ties by priority.
    #[must_use]
    pub fn best_category(&self, state: &GameState) -> Option<(Category, u16)> {
        state
            .open_categories()
            .into_iter()
            .map(|c| (c, state.potential(c)))
            .max_by(|(a, pa), (b, pb)| pa.cmp(pb).then_with(|| self.rank(*b).cmp(&self.rank(*a))))
    }

    fn hold_for(&self, target: Category, state: &GameState) -> HoldMask {
        let dice = state.values();
        let counts = state.dice().face_counts();

        if state.scorecard().is_joker(dice) {
            return HoldMask::all();
        }

        match target {
            Category::Ones
            | Category::Twos
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixes => {
                let face = target.face().unwrap_or(6);
                hold_matching(dice, |d| d == face)
            }
            Category::ThreeOfAKind | Category::FourOfAKind | Category::Yahtzee => {
                hold_most_common(dice, &counts)
            }
            Category::SmallStraight
                if !state.scorecard().is_filled(Category::LargeStraight)
                    && scoring::longest_run(&counts) == 4 =>
            {
                hold_run(dice, &counts)
            }
            // Made full house, straights: fixed value, nothing to gain
            Category::FullHouse | Category::SmallStraight | Category::LargeStraight => {
                HoldMask::all()
            }
            Category::Chance => hold_matching(dice, |d| d >= 4),
        }
    }
}

impl Strategy for RuleBasedStrategy {
    fn name(&self) -> &str {
        "rule_based"
    }

    fn choose_reroll(&self, state: &GameState, _rng: &mut GameRng) -> HoldMask {
        match self.best_category(state) {
            None => HoldMask::all(),
            Some((_, 0)) => {
                let counts = state.dice().face_counts();
                hold_most_common(state.values(), &counts)
            }
            Some((target, _)) => self.hold_for(target, state),
        }
    }

    fn choose_category(&self, state: &GameState, _rng: &mut GameRng) -> Result<Category, GameError> {
        self.best_category(state)
            .map(|(category, _)| category)
            .ok_or(GameError::NoOpenCategory)
    }
}

// =============================================================================
// Hold helpers
// =============================================================================

/// Hold every die whose value passes `keep`.
fn hold_matching(dice: &Hand, keep: impl Fn(u8) -> bool) -> HoldMask {
    dice.iter()
        .enumerate()
        .filter(|(_, &d)| keep(d))
        .fold(HoldMask::none(), |mask, (i, _)| mask.with(i))
}

/// Hold all dice of the most common face; ties go to the higher face.
fn hold_most_common(dice: &Hand, counts: &[u8; 7]) -> HoldMask {
    let face = (1..=6u8)
        .rev()
        .max_by_key(|&f| (counts[f as usize], f))
        .unwrap_or(6);
    hold_matching(dice, |d| d == face)
}

/// Hold one die of each face in the longest run of four consecutive faces.
fn hold_run(dice: &Hand, counts: &[u8; 7]) -> HoldMask {
    let Some(start) = (1..=3u8)
        .rev()
        .find(|&s| (s..s + 4).all(|f| counts[f as usize] > 0))
    else {
        return HoldMask::none();
    };

    let mut mask = HoldMask::none();
    let mut taken = [false; 7];
    for (i, &d) in dice.iter().enumerate() {
        if (start..start + 4).contains(&d) && !taken[d as usize] {
            taken[d as usize] = true;
            mask = mask.with(i);
        }
    }
    mask
}
