//! Scorecard: thirteen single-assignment slots plus bonuses.
//!
//! Each slot is `None` until filled. `fill` is the only mutation and fails if
//! the slot already holds a value, so the fill-once invariant is checked
//! mechanically rather than by convention.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::category::{Category, CATEGORY_COUNT};
use super::config::JokerRule;
use super::dice::{validate_hand, Hand};
use super::error::GameError;
use super::scoring::{
    self, FULL_HOUSE_SCORE, LARGE_STRAIGHT_SCORE, SMALL_STRAIGHT_SCORE, UPPER_BONUS,
    UPPER_BONUS_THRESHOLD, YAHTZEE_BONUS, YAHTZEE_SCORE,
};

/// Open categories; never more than thirteen, so no heap allocation.
pub type OpenCategories = SmallVec<[Category; CATEGORY_COUNT]>;

/// What a successful `fill` recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// The category filled.
    pub category: Category,
    /// Points written into the category.
    pub points: u16,
    /// Yahtzee bonus awarded by this fill (0 or 100).
    pub yahtzee_bonus: u16,
}

/// One player's scorecard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    slots: [Option<u16>; CATEGORY_COUNT],
    yahtzee_bonus_count: u16,
    joker_rule: JokerRule,
}

impl Default for Scorecard {
    fn default() -> Self {
        Self::new(JokerRule::default())
    }
}

impl Scorecard {
    /// Empty scorecard under the given joker rule.
    #[must_use]
    pub fn new(joker_rule: JokerRule) -> Self {
        Self {
            slots: [None; CATEGORY_COUNT],
            yahtzee_bonus_count: 0,
            joker_rule,
        }
    }

    /// Pure rule value of `dice` in `category`; ignores what is filled.
    #[must_use]
    pub fn score(&self, category: Category, dice: &Hand) -> u16 {
        scoring::score(category, dice)
    }

    /// The value `fill` would record right now.
    ///
    /// Equal to [`score`](Self::score) except when a joker applies. A hand
    /// with a face outside 1..=6 is worth 0 everywhere.
    #[must_use]
    pub fn potential(&self, category: Category, dice: &Hand) -> u16 {
        if validate_hand(dice).is_err() {
            return 0;
        }
        if self.is_joker(dice) {
            match category {
                Category::FullHouse => return FULL_HOUSE_SCORE,
                Category::SmallStraight => return SMALL_STRAIGHT_SCORE,
                Category::LargeStraight => return LARGE_STRAIGHT_SCORE,
                _ => {}
            }
        }
        scoring::score(category, dice)
    }

    /// Does `dice` act as a joker on this scorecard?
    #[must_use]
    pub fn is_joker(&self, dice: &Hand) -> bool {
        self.joker_rule == JokerRule::Hasbro
            && scoring::is_yahtzee(dice)
            && self.get(Category::Yahtzee).is_some()
    }

    /// Bonus that filling any category with `dice` would award now.
    #[must_use]
    pub fn pending_yahtzee_bonus(&self, dice: &Hand) -> u16 {
        if self.is_joker(dice) && self.get(Category::Yahtzee) == Some(YAHTZEE_SCORE) {
            YAHTZEE_BONUS
        } else {
            0
        }
    }

    /// Record `dice` in `category`.
    ///
    /// Fails if the category already holds a value or a die shows a face
    /// outside 1..=6; nothing changes then.
    pub fn fill(&mut self, category: Category, dice: &Hand) -> Result<Fill, GameError> {
        if self.slots[category.index()].is_some() {
            return Err(GameError::CategoryAlreadyFilled(category));
        }
        validate_hand(dice)?;

        let points = self.potential(category, dice);
        let yahtzee_bonus = self.pending_yahtzee_bonus(dice);
        if yahtzee_bonus > 0 {
            self.yahtzee_bonus_count += 1;
        }
        self.slots[category.index()] = Some(points);

        Ok(Fill {
            category,
            points,
            yahtzee_bonus,
        })
    }

    /// Value recorded in `category`, if filled.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<u16> {
        self.slots[category.index()]
    }

    /// Has `category` been filled?
    #[must_use]
    pub fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// All thirteen slots in scorecard order.
    #[must_use]
    pub fn slots(&self) -> &[Option<u16>; CATEGORY_COUNT] {
        &self.slots
    }

    /// Categories not yet filled, in scorecard order.
    #[must_use]
    pub fn open_categories(&self) -> OpenCategories {
        Category::ALL
            .iter()
            .copied()
            .filter(|&c| !self.is_filled(c))
            .collect()
    }

    /// Number of filled categories.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// All thirteen categories are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Sum of filled Ones..Sixes.
    #[must_use]
    pub fn upper_subtotal(&self) -> u16 {
        Category::UPPER.iter().filter_map(|&c| self.get(c)).sum()
    }

    /// 35 once the upper subtotal reaches 63, else 0.
    #[must_use]
    pub fn upper_bonus(&self) -> u16 {
        if self.upper_subtotal() >= UPPER_BONUS_THRESHOLD {
            UPPER_BONUS
        } else {
            0
        }
    }

    /// Number of Yahtzee bonuses earned.
    #[must_use]
    pub fn yahtzee_bonus_count(&self) -> u16 {
        self.yahtzee_bonus_count
    }

    /// Points from Yahtzee bonuses.
    #[must_use]
    pub fn yahtzee_bonus(&self) -> u16 {
        self.yahtzee_bonus_count * YAHTZEE_BONUS
    }

    /// Joker rule this scorecard scores under.
    #[must_use]
    pub fn joker_rule(&self) -> JokerRule {
        self.joker_rule
    }

    /// Filled values plus upper bonus plus Yahtzee bonuses.
    #[must_use]
    pub fn total(&self) -> u16 {
        let filled: u16 = self.slots.iter().flatten().sum();
        filled + self.upper_bonus() + self.yahtzee_bonus()
    }
}
