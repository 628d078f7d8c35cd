//! Held-spell state machine.
//!
//! ## Key Types
//!
//! - [`SpellHolder`]: Owns at most one held spell, its remaining uses and
//!   cooldown, and publishes lifecycle events
//! - [`Cooldown`]: Tick-driven `Idle -> Running -> Idle` timer
//! - [`HeldSpellView`]: Read-only snapshot handed to observers
//!
//! ## Example Usage
//!
//! ```
//! use spell_slot::core::{GameContext, Health};
//! use spell_slot::effects::{EffectHost, Regeneration};
//! use spell_slot::holder::{CastOutcome, SpellHolder};
//! use spell_slot::pickups::DroppedSpellRecord;
//! use spell_slot::spells::{SpellCatalog, SpellDefinition};
//!
//! let mut catalog = SpellCatalog::new();
//! catalog.register_effect("regeneration", Regeneration::default());
//! let regen = catalog
//!     .register(
//!         SpellDefinition::new("Regeneration", "regeneration")
//!             .with_max_uses(3)
//!             .with_cooldown(2.0),
//!     )
//!     .unwrap();
//!
//! let mut holder = SpellHolder::new();
//! let mut drops: Vec<DroppedSpellRecord> = Vec::new();
//! let mut effects = EffectHost::new();
//! let ctx = GameContext::default().with_health(Health::new(3, 10));
//!
//! holder.acquire(regen, None, &mut drops);
//! assert_eq!(
//!     holder.cast(&ctx, &mut effects),
//!     Ok(CastOutcome::Continued { remaining_uses: 2 })
//! );
//!
//! // Still cooling down
//! assert!(!holder.try_cast(&ctx, &mut effects));
//!
//! holder.advance(2.0);
//! assert!(holder.try_cast(&ctx, &mut effects));
//! assert_eq!(holder.remaining_uses(), 1);
//! ```

mod cooldown;
mod machine;
mod view;

pub use cooldown::Cooldown;
pub use machine::{CastOutcome, SpellHolder};
pub use view::HeldSpellView;
