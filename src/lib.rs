//! # spell-slot
//!
//! The player's held spell: acquiring it, casting it, its cooldown and
//! remaining uses, dropping it back into the world, and telling the UI about
//! all of it.
//!
//! ## Design Principles
//!
//! 1. **One Slot**: A player holds at most one spell. Picking up another
//!    drops the current one, with its remaining uses, where the player
//!    stands.
//!
//! 2. **Explicit Collaborators**: The holder owns no world. Every operation
//!    that reaches outside it (spawning effects, spawning pickups) takes the
//!    collaborator as an argument.
//!
//! 3. **Tick-Driven Time**: Cooldowns and effects advance by scaled game
//!    time, so pausing or slowing the game pauses or slows them.
//!
//! ## Modules
//!
//! - `core`: RNG, time scale, game context, configuration
//! - `error`: Catalog errors and cast rejections
//! - `spells`: Spell definitions and the validated catalog
//! - `effects`: Effect prototypes, running instances, the effect host
//! - `events`: Lifecycle events and observer registration
//! - `holder`: The held-spell state machine and its cooldown
//! - `pickups`: Dropped-spell records and world pickups
//! - `presenter`: Headless spell-button observer
//! - `runtime`: Per-player frame driver tying it all together

pub mod core;
pub mod effects;
pub mod error;
pub mod events;
pub mod holder;
pub mod pickups;
pub mod presenter;
pub mod runtime;
pub mod spells;

// Re-export commonly used types
pub use crate::core::{GameContext, GameRng, Health, Position, SpellConfig, TimeScale};

pub use crate::error::{CastRejection, CatalogError};

pub use crate::spells::{IconHandle, Spell, SpellCatalog, SpellDefinition, SpellId};

pub use crate::effects::{
    EffectHost, EffectInstance, EffectKey, EffectStatus, Regeneration, SpellEffect,
};

pub use crate::events::{RemovalReason, SpellEvent, SpellObserver, Subscription};

pub use crate::holder::{CastOutcome, Cooldown, HeldSpellView, SpellHolder};

pub use crate::pickups::{DropSink, DropSite, DroppedSpellRecord, PickupField, PickupId};

pub use crate::presenter::{ButtonCue, SpellButton};

pub use crate::runtime::{Command, FrameReport, SpellRuntime};
