//! Munchies minigame
//!
//! A timed round of catching falling food:
//! - `food`: Food catalog, spawn bands, falling items
//! - `round`: Countdown, combo scoring, replacement scheduling
//!
//! Rendering and input hit-testing stay with the renderer; this module only
//! learns which item id was clicked.

pub mod food;
pub mod round;

pub use food::{FoodItem, FoodKind, INITIAL_BAND, REPLACEMENT_BAND, SpawnBand};
pub use round::{CollectOutcome, MunchieRound, RoundState, RoundSummary, RoundView};
