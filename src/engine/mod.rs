//! Game engine: the turn state machine that plays one game.
//!
//! The engine owns the game state and the game's random streams. It asks a
//! [`Strategy`](crate::strategy::Strategy) for decisions but never depends on
//! which strategy it is talking to.

mod game;

pub use game::{GameEngine, TurnPhase, TurnRecord};
