//! Dropped-spell records and the drop bridge.

use std::sync::Arc;

use crate::spells::Spell;

/// A spell and its remaining uses, as carried by a dropped pickup.
#[derive(Clone, Debug, PartialEq)]
pub struct DroppedSpellRecord {
    spell: Arc<Spell>,
    remaining_uses: u32,
}

impl DroppedSpellRecord {
    #[must_use]
    pub fn new(spell: Arc<Spell>, remaining_uses: u32) -> Self {
        Self {
            spell,
            remaining_uses,
        }
    }

    #[must_use]
    pub fn spell(&self) -> &Arc<Spell> {
        &self.spell
    }

    #[must_use]
    pub fn remaining_uses(&self) -> u32 {
        self.remaining_uses
    }

    /// Split into the spell and its uses.
    #[must_use]
    pub fn into_parts(self) -> (Arc<Spell>, u32) {
        (self.spell, self.remaining_uses)
    }
}

/// Where the holder sends spells it drops.
///
/// The holder calls `materialize` once per dropped spell and never looks at
/// the result.
pub trait DropSink {
    fn materialize(&mut self, record: DroppedSpellRecord);
}

/// Collects drops in memory. Handy for hosts that place pickups themselves.
impl DropSink for Vec<DroppedSpellRecord> {
    fn materialize(&mut self, record: DroppedSpellRecord) {
        self.push(record);
    }
}
