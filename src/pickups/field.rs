//! World pickups.
//!
//! A pickup either carries a [`DroppedSpellRecord`] (it was dropped by the
//! player) or nothing (it was placed by the world and rolls a random spell
//! when collected). Collecting removes the pickup before anything else
//! happens, so a second collection signal for the same pickup finds nothing
//! and does nothing.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::core::{GameRng, Position};
use crate::holder::SpellHolder;
use crate::spells::SpellCatalog;

use super::record::{DropSink, DroppedSpellRecord};

/// Identifier of a pickup in a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(pub u32);

impl PickupId {
    /// Create a new pickup ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PickupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pickup({})", self.0)
    }
}

/// Asset key of the prefab a pickup is rendered with.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefabKey(String);

impl PrefabKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A spell pickup lying in the world.
#[derive(Clone, Debug, PartialEq)]
pub struct SpellPickup {
    id: PickupId,
    position: Position,
    prefab: PrefabKey,
    record: Option<DroppedSpellRecord>,
}

impl SpellPickup {
    #[must_use]
    pub fn id(&self) -> PickupId {
        self.id
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn prefab(&self) -> &PrefabKey {
        &self.prefab
    }

    /// The dropped spell, or `None` for a random pickup.
    #[must_use]
    pub fn record(&self) -> Option<&DroppedSpellRecord> {
        self.record.as_ref()
    }
}

/// All spell pickups currently in the world.
#[derive(Clone, Debug, Default)]
pub struct PickupField {
    /// `None` when the pickup prefab could not be resolved.
    prefab: Option<PrefabKey>,
    pickups: FxHashMap<PickupId, SpellPickup>,
    next_id: u32,
}

impl PickupField {
    /// Create an empty field that spawns pickups with `prefab`.
    #[must_use]
    pub fn new(prefab: Option<PrefabKey>) -> Self {
        Self {
            prefab,
            pickups: FxHashMap::default(),
            next_id: 0,
        }
    }

    /// Place a dropped spell in the world.
    ///
    /// Returns `None`, and the record is lost, if no prefab is available.
    pub fn materialize(
        &mut self,
        record: DroppedSpellRecord,
        position: Position,
    ) -> Option<PickupId> {
        self.spawn(Some(record), position)
    }

    /// Place a pickup that rolls a random spell when collected.
    pub fn spawn_random(&mut self, position: Position) -> Option<PickupId> {
        self.spawn(None, position)
    }

    fn spawn(
        &mut self,
        record: Option<DroppedSpellRecord>,
        position: Position,
    ) -> Option<PickupId> {
        let Some(prefab) = self.prefab.clone() else {
            error!(?position, "no pickup prefab loaded; pickup not spawned");
            return None;
        };

        let id = PickupId::new(self.next_id);
        self.next_id += 1;

        debug!(
            %id,
            spell = record.as_ref().map(|r| r.spell().name()),
            uses = record.as_ref().map(DroppedSpellRecord::remaining_uses),
            "pickup spawned"
        );

        self.pickups.insert(
            id,
            SpellPickup {
                id,
                position,
                prefab,
                record,
            },
        );
        Some(id)
    }

    /// Collect a pickup on behalf of the player.
    ///
    /// The pickup is consumed whatever happens next. A dropped record is
    /// re-acquired with its use count; a random pickup rolls from `catalog`.
    /// If the player already holds a spell, that spell is dropped at
    /// `player_position`.
    ///
    /// Returns `true` if a spell was acquired. Collecting an unknown or
    /// already consumed pickup is a no-op returning `false`.
    pub fn collect(
        &mut self,
        id: PickupId,
        holder: &mut SpellHolder,
        catalog: &SpellCatalog,
        rng: &mut GameRng,
        player_position: Position,
    ) -> bool {
        let Some(pickup) = self.pickups.remove(&id) else {
            debug!(%id, "pickup already consumed");
            return false;
        };

        let (spell, uses) = match pickup.record {
            Some(record) => {
                let (spell, uses) = record.into_parts();
                (spell, Some(uses))
            }
            None => match catalog.random(rng) {
                Some(spell) => (spell.clone(), None),
                None => {
                    warn!(%id, "random pickup collected with an empty catalog");
                    return false;
                }
            },
        };

        debug!(%id, spell = %spell, ?uses, "pickup collected");
        let mut site = DropSite::new(self, player_position);
        holder.acquire(spell, uses, &mut site);
        true
    }

    /// Get a pickup by ID.
    #[must_use]
    pub fn get(&self, id: PickupId) -> Option<&SpellPickup> {
        self.pickups.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: PickupId) -> bool {
        self.pickups.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    /// Iterate pickups in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &SpellPickup> {
        self.pickups.values()
    }

    #[must_use]
    pub fn prefab(&self) -> Option<&PrefabKey> {
        self.prefab.as_ref()
    }
}

/// A [`PickupField`] bound to the position drops should land at.
pub struct DropSite<'a> {
    field: &'a mut PickupField,
    position: Position,
}

impl<'a> DropSite<'a> {
    pub fn new(field: &'a mut PickupField, position: Position) -> Self {
        Self { field, position }
    }
}

impl DropSink for DropSite<'_> {
    fn materialize(&mut self, record: DroppedSpellRecord) {
        self.field.materialize(record, self.position);
    }
}
