//! Pickup/drop bridge between the world and the holder.
//!
//! ## Key Types
//!
//! - [`DroppedSpellRecord`]: A spell plus its remaining uses
//! - [`DropSink`]: Where the holder sends spells it drops
//! - [`PickupField`]: Pickup entities in the world
//! - [`DropSite`]: A field bound to a drop position; the usual `DropSink`

mod field;
mod record;

pub use field::{DropSite, PickupField, PickupId, PrefabKey, SpellPickup};
pub use record::{DropSink, DroppedSpellRecord};
