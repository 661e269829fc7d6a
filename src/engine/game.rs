//! Turn state machine for one game.
//!
//! ```text
//! TurnStart --roll--> Rolled(1) --reroll--> Rolled(2) --reroll--> Rolled(3)
//!                         |                     |                     |
//!                         +-------stop----------+---------------------+--> TurnEnd
//!                                                                           |
//!                                   fill: TurnStart (next turn) or GameOver <+
//! ```
//!
//! `fill` is also accepted directly from `Rolled(n)`. Human play drives the
//! machine step by step; simulated play calls `play_turn` / `play_game`,
//! which go through the exact same steps.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{
    Category, DiceStateError, Fill, GameConfig, GameError, GameRng, GameState, Hand, HoldMask,
    MAX_ROLLS,
};
use crate::strategy::Strategy;

/// Where the engine is within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Dice not yet rolled this turn.
    TurnStart,
    /// Dice rolled `n` times this turn (1..=3).
    Rolled(u8),
    /// Rolling finished; a category must be filled.
    TurnEnd,
    /// All thirteen categories filled.
    GameOver,
}

/// Everything that happened in one turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (1..=13).
    pub turn: u8,
    /// Dice after each roll.
    pub rolls: SmallVec<[Hand; 3]>,
    /// Hold masks applied before the second and third rolls.
    pub holds: SmallVec<[HoldMask; 2]>,
    /// The fill that ended the turn.
    pub fill: Fill,
}

/// Drives one game from the first roll to the final score.
#[derive(Clone, Debug)]
pub struct GameEngine {
    state: GameState,
    phase: TurnPhase,
    seed: u64,
    dice_rng: GameRng,
    strategy_rng: GameRng,
    rolls: SmallVec<[Hand; 3]>,
    holds: SmallVec<[HoldMask; 2]>,
    history: Vec<TurnRecord>,
}

impl GameEngine {
    /// Start a new game seeded with `seed`.
    #[must_use]
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self::with_rng(config, GameRng::new(seed))
    }

    /// Start a new game drawing from `rng`.
    ///
    /// Dice and strategy decisions use separate context streams.
    #[must_use]
    pub fn with_rng(config: &GameConfig, rng: GameRng) -> Self {
        Self {
            state: GameState::new(config),
            phase: TurnPhase::TurnStart,
            seed: rng.seed(),
            dice_rng: rng.for_context("dice"),
            strategy_rng: rng.for_context("strategy"),
            rolls: SmallVec::new(),
            holds: SmallVec::new(),
            history: Vec::with_capacity(crate::core::TURN_COUNT as usize),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Seed the game was started with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Has the last category been filled?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Completed turns, oldest first.
    #[must_use]
    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    /// Final score, once the game is over.
    #[must_use]
    pub fn final_score(&self) -> Option<u16> {
        self.is_over().then(|| self.state.scorecard().total())
    }

    // === Step-wise API ===

    /// First roll of the turn: all five dice, nothing held.
    pub fn roll(&mut self) -> Result<&Hand, GameError> {
        match self.phase {
            TurnPhase::TurnStart => {}
            TurnPhase::Rolled(_) | TurnPhase::TurnEnd => {
                return Err(DiceStateError::AlreadyRolled.into())
            }
            TurnPhase::GameOver => return Err(DiceStateError::GameOver.into()),
        }

        self.state.dice_mut().roll_all(&mut self.dice_rng);
        self.state.set_roll(1);
        self.phase = TurnPhase::Rolled(1);
        self.rolls.push(*self.state.values());
        Ok(self.state.values())
    }

    /// Reroll every die not held by `hold`.
    pub fn reroll(&mut self, hold: HoldMask) -> Result<&Hand, GameError> {
        let n = match self.phase {
            TurnPhase::Rolled(n) if n < MAX_ROLLS => n,
            TurnPhase::Rolled(_) | TurnPhase::TurnEnd => {
                return Err(DiceStateError::RollLimitExceeded { limit: MAX_ROLLS }.into())
            }
            TurnPhase::TurnStart => return Err(DiceStateError::NotRolled.into()),
            TurnPhase::GameOver => return Err(DiceStateError::GameOver.into()),
        };

        self.state.dice_mut().roll(hold, &mut self.dice_rng);
        self.state.set_roll(n + 1);
        self.phase = TurnPhase::Rolled(n + 1);
        self.holds.push(hold);
        self.rolls.push(*self.state.values());
        Ok(self.state.values())
    }

    /// Stop rolling for this turn.
    pub fn stop(&mut self) -> Result<(), GameError> {
        match self.phase {
            TurnPhase::Rolled(_) | TurnPhase::TurnEnd => {
                self.phase = TurnPhase::TurnEnd;
                Ok(())
            }
            TurnPhase::TurnStart => Err(DiceStateError::NotRolled.into()),
            TurnPhase::GameOver => Err(DiceStateError::GameOver.into()),
        }
    }

    /// Fill `category` with the current dice and end the turn.
    ///
    /// On error nothing changes and the turn can continue.
    pub fn fill(&mut self, category: Category) -> Result<Fill, GameError> {
        match self.phase {
            TurnPhase::Rolled(_) | TurnPhase::TurnEnd => {}
            TurnPhase::TurnStart => return Err(DiceStateError::NotRolled.into()),
            TurnPhase::GameOver => return Err(DiceStateError::GameOver.into()),
        }

        let dice = *self.state.values();
        let fill = self.state.scorecard_mut().fill(category, &dice)?;

        self.history.push(TurnRecord {
            turn: self.state.turn(),
            rolls: std::mem::take(&mut self.rolls),
            holds: std::mem::take(&mut self.holds),
            fill,
        });

        if self.state.scorecard().is_complete() {
            self.phase = TurnPhase::GameOver;
        } else {
            self.state.advance_turn();
            self.phase = TurnPhase::TurnStart;
        }
        Ok(fill)
    }

    // === Strategy-driven play ===

    /// Play one whole turn with `strategy`.
    pub fn play_turn(&mut self, strategy: &dyn Strategy) -> Result<&TurnRecord, GameError> {
        self.roll()?;

        while self.state.roll() < MAX_ROLLS {
            let hold = strategy.choose_reroll(&self.state, &mut self.strategy_rng);
            if hold.is_all() {
                break;
            }
            self.reroll(hold)?;
        }
        self.stop()?;

        let category = strategy.choose_category(&self.state, &mut self.strategy_rng)?;
        self.fill(category)?;

        self.history
            .last()
            .ok_or(GameError::InvalidDiceState(DiceStateError::NotRolled))
    }

    /// Play the remaining turns with `strategy` and return the final score.
    ///
    /// The first error ends the game; it is returned as-is.
    pub fn play_game(&mut self, strategy: &dyn Strategy) -> Result<u16, GameError> {
        while !self.is_over() {
            self.play_turn(strategy)?;
        }
        Ok(self.state.scorecard().total())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::new(&GameConfig::default(), 42)
    }

    #[test]
    fn test_starts_at_turn_start() {
        let engine = engine();
        assert_eq!(engine.phase(), TurnPhase::TurnStart);
        assert_eq!(engine.state().turn(), 1);
        assert_eq!(engine.final_score(), None);
    }

    #[test]
    fn test_roll_sequence() {
        let mut engine = engine();
        engine.roll().unwrap();
        assert_eq!(engine.phase(), TurnPhase::Rolled(1));

        let before = *engine.state().values();
        let hold = HoldMask::from_indices(&[0, 1, 2]).unwrap();
        let after = *engine.reroll(hold).unwrap();
        assert_eq!(&after[..3], &before[..3]);
        assert_eq!(engine.phase(), TurnPhase::Rolled(2));

        engine.reroll(HoldMask::none()).unwrap();
        assert_eq!(engine.phase(), TurnPhase::Rolled(3));
        assert_eq!(engine.state().rolls_left(), 0);
    }

    #[test]
    fn test_fourth_roll_rejected() {
        let mut engine = engine();
        engine.roll().unwrap();
        engine.reroll(HoldMask::none()).unwrap();
        engine.reroll(HoldMask::none()).unwrap();

        let err = engine.reroll(HoldMask::none()).unwrap_err();
        assert_eq!(
            err,
            GameError::InvalidDiceState(DiceStateError::RollLimitExceeded { limit: 3 })
        );
    }

    #[test]
    fn test_wrong_phase_errors() {
        let mut engine = engine();
        assert_eq!(
            engine.reroll(HoldMask::none()).unwrap_err(),
            GameError::from(DiceStateError::NotRolled)
        );
        assert_eq!(
            engine.fill(Category::Chance).unwrap_err(),
            GameError::from(DiceStateError::NotRolled)
        );
        assert_eq!(engine.stop().unwrap_err(), GameError::from(DiceStateError::NotRolled));

        engine.roll().unwrap();
        assert_eq!(engine.roll().unwrap_err(), GameError::from(DiceStateError::AlreadyRolled));
    }

    #[test]
    fn test_stop_then_fill() {
        let mut engine = engine();
        engine.roll().unwrap();
        engine.stop().unwrap();
        assert_eq!(engine.phase(), TurnPhase::TurnEnd);
        assert!(engine.reroll(HoldMask::none()).is_err());

        let dice = *engine.state().values();
        let fill = engine.fill(Category::Chance).unwrap();
        assert_eq!(fill.points, dice.iter().map(|&d| u16::from(d)).sum::<u16>());
        assert_eq!(engine.phase(), TurnPhase::TurnStart);
        assert_eq!(engine.state().turn(), 2);
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.history()[0].rolls.len(), 1);
    }

    #[test]
    fn test_failed_fill_keeps_turn() {
        let mut engine = engine();
        engine.roll().unwrap();
        engine.fill(Category::Chance).unwrap();

        engine.roll().unwrap();
        let err = engine.fill(Category::Chance).unwrap_err();
        assert_eq!(err, GameError::CategoryAlreadyFilled(Category::Chance));
        assert_eq!(engine.phase(), TurnPhase::Rolled(1));

        engine.fill(Category::Ones).unwrap();
        assert_eq!(engine.state().turn(), 3);
    }

    #[test]
    fn test_manual_game_to_completion() {
        let mut engine = engine();
        for &category in &crate::core::Category::ALL {
            engine.roll().unwrap();
            engine.fill(category).unwrap();
        }

        assert!(engine.is_over());
        assert_eq!(engine.state().turn(), 13);
        assert_eq!(engine.final_score(), Some(engine.state().scorecard().total()));
        assert_eq!(engine.roll().unwrap_err(), GameError::from(DiceStateError::GameOver));
        assert_eq!(engine.history().len(), 13);
    }

    #[test]
    fn test_same_seed_same_dice() {
        let mut a = engine();
        let mut b = engine();
        assert_eq!(a.roll().unwrap(), b.roll().unwrap());
    }
}
