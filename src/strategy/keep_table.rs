//! Precomputed dice transition tables.
//!
//! Dice order never matters for scoring, so hands and kept dice are tracked
//! as multisets (face counts). There are 252 distinct five-dice hands and 462
//! distinct kept subsets (zero to five dice). For every kept subset the table
//! stores which hands a reroll can produce and with what probability.
//!
//! Built once per strategy, shared read-only by every game.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{Hand, HoldMask, DICE_COUNT};

/// Face counts, index 0 = face 1.
type Counts = [u8; 6];

/// Number of distinct five-dice hands.
pub const HAND_COUNT: usize = 252;

/// Number of distinct kept subsets of a hand, empty and full included.
pub const KEEP_COUNT: usize = 462;

/// Dice transition tables over multisets.
#[derive(Clone, Debug)]
pub struct KeepTable {
    /// Sorted hands, indexed by hand id.
    hands: Vec<Hand>,
    hand_ids: FxHashMap<u32, usize>,
    keep_ids: FxHashMap<u32, usize>,
    /// Per keep id: reachable hand ids and their probabilities.
    transitions: Vec<Vec<(usize, f64)>>,
    /// Per hand id: distinct keep ids obtainable by holding some of its dice.
    sub_keeps: Vec<SmallVec<[usize; 32]>>,
}

impl Default for KeepTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeepTable {
    /// Build all tables.
    pub fn new() -> Self {
        let hand_counts = multisets(DICE_COUNT as u8);
        let hand_ids: FxHashMap<u32, usize> = hand_counts
            .iter()
            .enumerate()
            .map(|(id, c)| (key(c), id))
            .collect();
        let hands: Vec<Hand> = hand_counts.iter().map(expand).collect();

        let keep_counts: Vec<Counts> = (0..=DICE_COUNT as u8).flat_map(multisets).collect();
        let keep_ids: FxHashMap<u32, usize> = keep_counts
            .iter()
            .enumerate()
            .map(|(id, c)| (key(c), id))
            .collect();

        let transitions = keep_counts
            .iter()
            .map(|kept| {
                let size: u8 = kept.iter().sum();
                let rolled = DICE_COUNT as u8 - size;
                multisets(rolled)
                    .iter()
                    .map(|roll| {
                        let hand: Counts = std::array::from_fn(|f| kept[f] + roll[f]);
                        (hand_ids[&key(&hand)], probability(roll))
                    })
                    .collect()
            })
            .collect();

        let sub_keeps = hands
            .iter()
            .map(|hand| {
                let mut ids: SmallVec<[usize; 32]> = HoldMask::every()
                    .map(|mask| keep_ids[&key(&kept_counts(hand, mask))])
                    .collect();
                ids.sort_unstable();
                ids.dedup();
                ids
            })
            .collect();

        Self {
            hands,
            hand_ids,
            keep_ids,
            transitions,
            sub_keeps,
        }
    }

    /// All distinct hands, sorted ascending within each hand.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// Number of distinct kept subsets.
    #[must_use]
    pub fn keep_count(&self) -> usize {
        self.transitions.len()
    }

    /// Hand id of `dice`, in any order.
    #[must_use]
    pub fn hand_id(&self, dice: &Hand) -> usize {
        self.hand_ids[&key(&counts_of(dice))]
    }

    /// Keep id of the dice `mask` holds from `dice`.
    #[must_use]
    pub fn keep_id(&self, dice: &Hand, mask: HoldMask) -> usize {
        self.keep_ids[&key(&kept_counts(dice, mask))]
    }

    /// Reachable hands and probabilities after rerolling around `keep`.
    #[must_use]
    pub fn transitions(&self, keep: usize) -> &[(usize, f64)] {
        &self.transitions[keep]
    }

    /// Expected value of `values` (indexed by hand id) after rerolling
    /// everything not in `keep`.
    #[must_use]
    pub fn expect(&self, keep: usize, values: &[f64]) -> f64 {
        self.transitions[keep]
            .iter()
            .map(|&(hand, p)| p * values[hand])
            .sum()
    }

    /// Expected value of each keep id, one reroll ahead.
    #[must_use]
    pub fn expect_all(&self, values: &[f64]) -> Vec<f64> {
        (0..self.keep_count()).map(|k| self.expect(k, values)).collect()
    }

    /// Best keep value reachable from each hand.
    #[must_use]
    pub fn best_keep(&self, keep_values: &[f64]) -> Vec<f64> {
        self.sub_keeps
            .iter()
            .map(|keeps| {
                keeps
                    .iter()
                    .map(|&k| keep_values[k])
                    .fold(f64::NEG_INFINITY, f64::max)
            })
            .collect()
    }
}

// =============================================================================
// Multiset helpers
// =============================================================================

/// Every multiset of `size` dice, as face counts.
fn multisets(size: u8) -> Vec<Counts> {
    let mut out = Vec::new();
    let mut counts = [0u8; 6];
    push_multisets(0, size, &mut counts, &mut out);
    out
}

fn push_multisets(face: usize, remaining: u8, counts: &mut Counts, out: &mut Vec<Counts>) {
    if face == 5 {
        counts[5] = remaining;
        out.push(*counts);
        counts[5] = 0;
        return;
    }
    for c in 0..=remaining {
        counts[face] = c;
        push_multisets(face + 1, remaining - c, counts, out);
    }
    counts[face] = 0;
}

/// Base-6 encoding of face counts.
fn key(counts: &Counts) -> u32 {
    counts
        .iter()
        .rev()
        .fold(0u32, |acc, &c| acc * 6 + u32::from(c))
}

fn counts_of(dice: &Hand) -> Counts {
    let mut counts = [0u8; 6];
    for &d in dice {
        counts[usize::from(d - 1)] += 1;
    }
    counts
}

fn kept_counts(dice: &Hand, mask: HoldMask) -> Counts {
    let mut counts = [0u8; 6];
    for i in mask.indices() {
        counts[usize::from(dice[i] - 1)] += 1;
    }
    counts
}

/// Sorted five-dice hand from counts.
fn expand(counts: &Counts) -> Hand {
    let mut hand = [1u8; DICE_COUNT];
    let mut slot = 0;
    for (face, &n) in counts.iter().enumerate() {
        for _ in 0..n {
            hand[slot] = face as u8 + 1;
            slot += 1;
        }
    }
    hand
}

/// Probability of rolling exactly this multiset with fair dice.
fn probability(roll: &Counts) -> f64 {
    let n: u32 = roll.iter().map(|&c| u32::from(c)).sum();
    let arrangements = roll
        .iter()
        .fold(factorial(n), |acc, &c| acc / factorial(u32::from(c)));
    arrangements as f64 / 6f64.powi(n as i32)
}

fn factorial(n: u32) -> u64 {
    (1..=u64::from(n)).product()
}
