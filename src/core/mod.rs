//! Core building blocks: RNG, scaled time, game context, configuration.
//!
//! Nothing here knows about spells. The holder, effects and pickups are all
//! built on top of these types.

pub mod clock;
pub mod config;
pub mod context;
pub mod rng;

pub use clock::TimeScale;
pub use config::{PresenterTimings, SpellConfig, DEFAULT_PICKUP_PREFAB};
pub use context::{GameContext, Health, PlayerState, Position};
pub use rng::GameRng;
