//! Five dice with per-die hold flags.
//!
//! ## HoldMask
//!
//! Bit `i` set means die `i` is held (kept) on the next roll. Masks are
//! plain 5-bit values so strategies can enumerate all 32 of them cheaply.
//!
//! ## DiceSet
//!
//! Values plus the held flags of the last roll. Held dice never change.

use serde::{Deserialize, Serialize};

use super::error::DiceStateError;
use super::rng::GameRng;

/// Number of dice in a hand.
pub const DICE_COUNT: usize = 5;

/// A hand of five die values, each in 1..=6.
pub type Hand = [u8; DICE_COUNT];

/// Is `face` a legal die face?
#[must_use]
pub fn is_face(face: u8) -> bool {
    (1..=6).contains(&face)
}

/// Check that every die in `dice` shows a face in 1..=6.
pub fn validate_hand(dice: &Hand) -> Result<(), DiceStateError> {
    match dice.iter().find(|&&v| !is_face(v)) {
        Some(&value) => Err(DiceStateError::FaceOutOfRange { value }),
        None => Ok(()),
    }
}

/// Count how many dice show each face. Index 0 is unused and faces outside
/// 1..=6 are not counted.
#[must_use]
pub fn face_counts(dice: &Hand) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &d in dice.iter().filter(|&&d| is_face(d)) {
        counts[usize::from(d)] += 1;
    }
    counts
}

/// Per-die hold flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoldMask(u8);

impl HoldMask {
    const FULL: u8 = (1 << DICE_COUNT) - 1;

    /// Hold nothing: reroll all five dice.
    #[must_use]
    pub const fn none() -> Self {
        Self(0)
    }

    /// Hold everything: no die is rerolled.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::FULL)
    }

    /// Build from raw bits; bits above the fifth are ignored.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::FULL)
    }

    /// Raw bits (0..32).
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build from one flag per die.
    #[must_use]
    pub fn from_bools(held: [bool; DICE_COUNT]) -> Self {
        let mut bits = 0u8;
        for (i, h) in held.into_iter().enumerate() {
            if h {
                bits |= 1 << i;
            }
        }
        Self(bits)
    }

    /// Build from the indices of held dice.
    ///
    /// Fails on any index outside `0..5`.
    pub fn from_indices(indices: &[usize]) -> Result<Self, DiceStateError> {
        let mut bits = 0u8;
        for &index in indices {
            if index >= DICE_COUNT {
                return Err(DiceStateError::IndexOutOfRange { index });
            }
            bits |= 1 << index;
        }
        Ok(Self(bits))
    }

    /// Is die `index` held?
    #[must_use]
    pub const fn is_held(self, index: usize) -> bool {
        index < DICE_COUNT && self.0 & (1 << index) != 0
    }

    /// Hold die `index` as well.
    #[must_use]
    pub const fn with(self, index: usize) -> Self {
        Self::from_bits(self.0 | (1 << index))
    }

    /// Number of held dice.
    #[must_use]
    pub const fn held_count(self) -> u32 {
        self.0.count_ones()
    }

    /// True when every die is held (nothing left to reroll).
    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::FULL
    }

    /// One flag per die.
    #[must_use]
    pub fn to_bools(self) -> [bool; DICE_COUNT] {
        std::array::from_fn(|i| self.is_held(i))
    }

    /// Indices of held dice, ascending.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..DICE_COUNT).filter(move |&i| self.is_held(i))
    }

    /// Every possible mask, from hold-nothing to hold-all.
    pub fn every() -> impl Iterator<Item = HoldMask> {
        (0..=Self::FULL).map(HoldMask)
    }
}

impl std::fmt::Display for HoldMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..DICE_COUNT {
            f.write_str(if self.is_held(i) { "H" } else { "." })?;
        }
        Ok(())
    }
}

/// Five dice and their held flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceSet {
    values: Hand,
    held: HoldMask,
}

impl Default for DiceSet {
    fn default() -> Self {
        Self {
            values: [1; DICE_COUNT],
            held: HoldMask::none(),
        }
    }
}

impl DiceSet {
    /// Dice showing all ones, none held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dice showing the given values, none held.
    pub fn from_values(values: Hand) -> Result<Self, DiceStateError> {
        validate_hand(&values)?;
        Ok(Self {
            values,
            held: HoldMask::none(),
        })
    }

    /// Reroll every die not held by `mask`; held dice keep their value.
    pub fn roll(&mut self, mask: HoldMask, rng: &mut GameRng) {
        for (i, value) in self.values.iter_mut().enumerate() {
            if !mask.is_held(i) {
                *value = rng.roll_die();
            }
        }
        self.held = mask;
    }

    /// Clear held flags and roll all five dice.
    pub fn roll_all(&mut self, rng: &mut GameRng) {
        self.roll(HoldMask::none(), rng);
    }

    /// Current die values.
    #[must_use]
    pub fn values(&self) -> &Hand {
        &self.values
    }

    /// Held flags applied on the last roll.
    #[must_use]
    pub fn held(&self) -> HoldMask {
        self.held
    }

    /// Face counts of the current values.
    #[must_use]
    pub fn face_counts(&self) -> [u8; 7] {
        face_counts(&self.values)
    }

    /// Sum of all five dice.
    #[must_use]
    pub fn sum(&self) -> u16 {
        self.values.iter().map(|&v| u16::from(v)).sum()
    }
}

impl std::fmt::Display for DiceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.values.iter().map(|v| v.to_string()).collect();
        write!(f, "[{}]", parts.join(" "))
    }
}
