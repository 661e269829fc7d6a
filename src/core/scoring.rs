//! Pure scoring rules: what a hand is worth in each category.
//!
//! These functions never look at a scorecard. Joker scoring and bonuses
//! live in [`Scorecard`](super::Scorecard).

use super::category::Category;
use super::dice::{face_counts, is_face, Hand};

pub const FULL_HOUSE_SCORE: u16 = 25;
pub const SMALL_STRAIGHT_SCORE: u16 = 30;
pub const LARGE_STRAIGHT_SCORE: u16 = 40;
pub const YAHTZEE_SCORE: u16 = 50;

/// Upper subtotal needed for the upper bonus.
pub const UPPER_BONUS_THRESHOLD: u16 = 63;
pub const UPPER_BONUS: u16 = 35;
/// Awarded per extra Yahtzee once the Yahtzee box holds 50.
pub const YAHTZEE_BONUS: u16 = 100;

/// Highest final score reachable under the joker rules.
pub const MAX_TOTAL_SCORE: u16 = 1575;

/// Points `dice` earn in `category`.
///
/// Faces outside 1..=6 count as absent; they never score and never panic.
#[must_use]
pub fn score(category: Category, dice: &Hand) -> u16 {
    let counts = face_counts(dice);
    match category {
        Category::Ones
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or(0);
            u16::from(counts[face as usize]) * u16::from(face)
        }
        Category::ThreeOfAKind => of_a_kind(&counts, 3, dice),
        Category::FourOfAKind => of_a_kind(&counts, 4, dice),
        Category::FullHouse => {
            if is_full_house(&counts) {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if longest_run(&counts) >= 4 {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if longest_run(&counts) >= 5 {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yahtzee => {
            if is_yahtzee(dice) {
                YAHTZEE_SCORE
            } else {
                0
            }
        }
        Category::Chance => sum(dice),
    }
}

/// Sum of all five dice.
#[must_use]
pub fn sum(dice: &Hand) -> u16 {
    dice.iter().filter(|&&d| is_face(d)).map(|&d| u16::from(d)).sum()
}

/// All five dice show the same face.
#[must_use]
pub fn is_yahtzee(dice: &Hand) -> bool {
    is_face(dice[0]) && dice.iter().all(|&d| d == dice[0])
}

/// Exactly two distinct faces split 3-and-2.
#[must_use]
pub fn is_full_house(counts: &[u8; 7]) -> bool {
    counts.contains(&3) && counts.contains(&2)
}

/// Length of the longest run of consecutive faces present.
#[must_use]
pub fn longest_run(counts: &[u8; 7]) -> usize {
    let mut best = 0;
    let mut current = 0;
    for &c in &counts[1..] {
        if c > 0 {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}

fn of_a_kind(counts: &[u8; 7], needed: u8, dice: &Hand) -> u16 {
    if counts.iter().any(|&c| c >= needed) {
        sum(dice)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_section() {
        assert_eq!(score(Category::Ones, &[1, 1, 2, 3, 4]), 2);
        assert_eq!(score(Category::Twos, &[1, 2, 2, 3, 4]), 4);
        assert_eq!(score(Category::Threes, &[1, 2, 3, 3, 4]), 6);
        assert_eq!(score(Category::Fours, &[1, 4, 4, 4, 5]), 12);
        assert_eq!(score(Category::Fives, &[1, 2, 5, 5, 5]), 15);
        assert_eq!(score(Category::Sixes, &[6, 6, 6, 6, 2]), 24);
        assert_eq!(score(Category::Sixes, &[1, 2, 3, 4, 5]), 0);
    }

    #[test]
    fn test_of_a_kind() {
        assert_eq!(score(Category::ThreeOfAKind, &[3, 3, 3, 4, 5]), 18);
        assert_eq!(score(Category::ThreeOfAKind, &[1, 2, 3, 4, 5]), 0);
        assert_eq!(score(Category::ThreeOfAKind, &[2, 2, 2, 2, 5]), 13);
        assert_eq!(score(Category::FourOfAKind, &[4, 4, 4, 4, 5]), 21);
        assert_eq!(score(Category::FourOfAKind, &[1, 1, 1, 2, 3]), 0);
        assert_eq!(score(Category::FourOfAKind, &[6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn test_full_house() {
        assert_eq!(score(Category::FullHouse, &[2, 2, 3, 3, 3]), 25);
        assert_eq!(score(Category::FullHouse, &[3, 2, 3, 2, 3]), 25);
        assert_eq!(score(Category::FullHouse, &[1, 2, 3, 4, 5]), 0);
        assert_eq!(score(Category::FullHouse, &[2, 2, 2, 2, 3]), 0);
        assert_eq!(score(Category::FullHouse, &[5, 5, 5, 5, 5]), 0);
    }

    #[test]
    fn test_straights() {
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::SmallStraight, &[2, 3, 4, 5, 5]), 30);
        assert_eq!(score(Category::SmallStraight, &[3, 4, 5, 6, 6]), 30);
        assert_eq!(score(Category::SmallStraight, &[1, 1, 2, 3, 4]), 30);
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 5, 6]), 0);
        assert_eq!(score(Category::SmallStraight, &[1, 2, 3, 4, 5]), 30);

        assert_eq!(score(Category::LargeStraight, &[1, 2, 3, 4, 5]), 40);
        assert_eq!(score(Category::LargeStraight, &[6, 5, 4, 3, 2]), 40);
        assert_eq!(score(Category::LargeStraight, &[1, 2, 3, 4, 6]), 0);
        assert_eq!(score(Category::LargeStraight, &[1, 2, 2, 3, 4]), 0);
    }

    #[test]
    fn test_yahtzee_and_chance() {
        assert_eq!(score(Category::Yahtzee, &[4, 4, 4, 4, 4]), 50);
        assert_eq!(score(Category::Yahtzee, &[1, 1, 1, 1, 2]), 0);
        assert_eq!(score(Category::Chance, &[1, 2, 3, 4, 5]), 15);
        assert_eq!(score(Category::Chance, &[6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn test_longest_run() {
        assert_eq!(longest_run(&face_counts(&[1, 3, 5, 2, 6])), 3);
        assert_eq!(longest_run(&face_counts(&[4, 4, 4, 4, 4])), 1);
        assert_eq!(longest_run(&face_counts(&[2, 3, 4, 5, 6])), 5);
    }
}
