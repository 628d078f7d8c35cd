//! Spell definitions - static spell data.
//!
//! `SpellDefinition` is what designers author: cooldown, number of uses, the
//! icon to show and the name of the effect to spawn. A definition that passed
//! catalog validation becomes a [`Spell`], which also carries the resolved
//! effect prototype. Spells are immutable and shared behind `Arc` by the
//! catalog, the holder, pickups and in-flight events alike.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::effects::{EffectKey, SpellEffect};

/// Identifier of a registered spell.
///
/// Assigned by the catalog in registration order, starting at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpellId(pub u32);

impl SpellId {
    /// Create a new spell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SpellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spell({})", self.0)
    }
}

/// Opaque icon reference, passed through untouched to the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconHandle(pub u32);

/// Authored spell data.
///
/// ## Example
///
/// ```
/// use spell_slot::spells::{IconHandle, SpellDefinition};
///
/// let regen = SpellDefinition::new("Regeneration", "regeneration")
///     .with_cooldown(2.0)
///     .with_max_uses(3)
///     .with_icon(IconHandle(7));
///
/// assert_eq!(regen.max_uses, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellDefinition {
    /// Display name, unique within a catalog.
    pub name: String,

    /// Seconds of game time between casts.
    #[serde(default)]
    pub cooldown_seconds: f32,

    /// Uses granted on a fresh pickup.
    pub max_uses: u32,

    #[serde(default)]
    pub icon: IconHandle,

    /// Effect prototype to spawn on cast.
    pub effect: EffectKey,
}

impl SpellDefinition {
    /// Create a definition with one use and no cooldown.
    pub fn new(name: impl Into<String>, effect: impl Into<EffectKey>) -> Self {
        Self {
            name: name.into(),
            cooldown_seconds: 0.0,
            max_uses: 1,
            icon: IconHandle::default(),
            effect: effect.into(),
        }
    }

    /// Set the cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, seconds: f32) -> Self {
        self.cooldown_seconds = seconds;
        self
    }

    /// Set the number of uses (builder pattern).
    #[must_use]
    pub fn with_max_uses(mut self, uses: u32) -> Self {
        self.max_uses = uses;
        self
    }

    /// Set the icon (builder pattern).
    #[must_use]
    pub fn with_icon(mut self, icon: IconHandle) -> Self {
        self.icon = icon;
        self
    }
}

/// A validated spell: a definition bound to its effect prototype.
///
/// Only the catalog creates these, so every `Spell` is known to have
/// `max_uses > 0`, a sane cooldown and a runnable effect.
#[derive(Clone, Debug)]
pub struct Spell {
    id: SpellId,
    definition: SpellDefinition,
    effect: Arc<dyn SpellEffect>,
}

impl Spell {
    pub(crate) fn new(
        id: SpellId,
        definition: SpellDefinition,
        effect: Arc<dyn SpellEffect>,
    ) -> Self {
        Self {
            id,
            definition,
            effect,
        }
    }

    #[must_use]
    pub fn id(&self) -> SpellId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    #[must_use]
    pub fn definition(&self) -> &SpellDefinition {
        &self.definition
    }

    #[must_use]
    pub fn cooldown_seconds(&self) -> f32 {
        self.definition.cooldown_seconds
    }

    #[must_use]
    pub fn max_uses(&self) -> u32 {
        self.definition.max_uses
    }

    #[must_use]
    pub fn icon(&self) -> IconHandle {
        self.definition.icon
    }

    /// The effect prototype spawned on cast.
    #[must_use]
    pub fn effect(&self) -> &dyn SpellEffect {
        self.effect.as_ref()
    }
}

impl PartialEq for Spell {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.definition == other.definition
    }
}

impl fmt::Display for Spell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.id, self.definition.name)
    }
}
