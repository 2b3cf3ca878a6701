//! Data structures for the player registry.

mod player;

pub use player::{Gender, PlayerId, PlayerRecord, BELT_DEGREES, DEFAULT_SPORT, NO_PHOTO};
