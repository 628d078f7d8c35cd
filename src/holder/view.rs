//! Read-only snapshot of the holder.

use std::sync::Arc;

use crate::spells::{IconHandle, Spell, SpellDefinition};

use super::cooldown::Cooldown;

/// What observers (and the query surface) can see of the holder.
#[derive(Clone, Copy, Debug)]
pub struct HeldSpellView<'a> {
    spell: Option<&'a Arc<Spell>>,
    remaining_uses: u32,
    cooldown: &'a Cooldown,
}

impl<'a> HeldSpellView<'a> {
    pub(crate) fn new(
        spell: Option<&'a Arc<Spell>>,
        remaining_uses: u32,
        cooldown: &'a Cooldown,
    ) -> Self {
        Self {
            spell,
            remaining_uses,
            cooldown,
        }
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.spell.is_some()
    }

    #[must_use]
    pub fn spell(&self) -> Option<&'a Arc<Spell>> {
        self.spell
    }

    #[must_use]
    pub fn current_definition(&self) -> Option<&'a SpellDefinition> {
        self.spell.map(|spell| spell.definition())
    }

    #[must_use]
    pub fn current_icon(&self) -> Option<IconHandle> {
        self.spell.map(|spell| spell.icon())
    }

    /// `0` when nothing is held.
    #[must_use]
    pub fn remaining_uses(&self) -> u32 {
        self.remaining_uses
    }

    #[must_use]
    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown.is_active()
    }

    #[must_use]
    pub fn cooldown_progress(&self) -> f32 {
        self.cooldown.progress()
    }
}
