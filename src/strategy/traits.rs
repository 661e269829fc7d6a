//! The decision interface between the engine and a player.
//!
//! The engine only ever talks to `dyn Strategy`. New strategies plug in
//! without engine changes.

use crate::core::{Category, GameError, GameRng, GameState, HoldMask};

/// A decision procedure for one player.
///
/// ## Implementation Notes
///
/// - Strategies are shared read-only across concurrently simulated games, so
///   they must be `Send + Sync` and keep no per-game mutable state.
/// - Any randomness comes from the `rng` argument, which is private to the
///   game being played.
/// - `choose_reroll` is offered after rolls 1 and 2 only. Returning
///   [`HoldMask::all`] ends the turn's rolling early.
/// - `choose_category` must return an open category. With a complete
///   scorecard it fails with [`GameError::NoOpenCategory`].
pub trait Strategy: Send + Sync {
    /// Name used as the key in simulation results.
    fn name(&self) -> &str;

    /// Which dice to hold before the next roll.
    fn choose_reroll(&self, state: &GameState, rng: &mut GameRng) -> HoldMask;

    /// Which open category to fill with the current dice.
    fn choose_category(&self, state: &GameState, rng: &mut GameRng)
        -> Result<Category, GameError>;
}
