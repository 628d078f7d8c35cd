//! Spell catalog: validated registry of castable spells.
//!
//! Effect prototypes are registered in code under an [`EffectKey`]; spell
//! definitions are then registered one by one or loaded from a JSON manifest.
//! Every definition is validated once, here. A bad definition is refused and
//! reported; it never reaches the holder, and the rest of the catalog still
//! loads.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::GameRng;
use crate::effects::{EffectKey, SpellEffect};
use crate::error::CatalogError;

use super::definition::{Spell, SpellDefinition, SpellId};

/// On-disk catalog format.
///
/// ```json
/// { "spells": [ { "name": "Regeneration", "cooldown_seconds": 2.0,
///                 "max_uses": 3, "icon": 7, "effect": "regeneration" } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogManifest {
    pub spells: Vec<SpellDefinition>,
}

/// Outcome of loading a manifest.
#[derive(Debug, Default)]
pub struct ManifestReport {
    /// Spells registered, in manifest order.
    pub loaded: Vec<SpellId>,
    /// Definitions that were refused.
    pub rejected: Vec<CatalogError>,
}

impl ManifestReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Registry of spells and the effect prototypes they reference.
///
/// ## Example
///
/// ```
/// use spell_slot::effects::Regeneration;
/// use spell_slot::spells::{SpellCatalog, SpellDefinition};
///
/// let mut catalog = SpellCatalog::new();
/// catalog.register_effect("regeneration", Regeneration::default());
///
/// let spell = catalog
///     .register(SpellDefinition::new("Regeneration", "regeneration").with_max_uses(3))
///     .unwrap();
///
/// assert_eq!(catalog.by_name("Regeneration").unwrap().id(), spell.id());
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpellCatalog {
    effects: FxHashMap<EffectKey, Arc<dyn SpellEffect>>,
    /// Indexed by `SpellId`.
    spells: Vec<Arc<Spell>>,
    by_name: FxHashMap<String, SpellId>,
}

impl SpellCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an effect prototype under `key`.
    ///
    /// Returns the prototype previously registered under that key, if any.
    /// Spells already registered keep the prototype they were bound to.
    pub fn register_effect(
        &mut self,
        key: impl Into<EffectKey>,
        effect: impl SpellEffect + 'static,
    ) -> Option<Arc<dyn SpellEffect>> {
        self.effects.insert(key.into(), Arc::new(effect))
    }

    /// Check a definition without registering it.
    ///
    /// Returns the effect prototype the definition would be bound to.
    pub fn validate(
        &self,
        definition: &SpellDefinition,
    ) -> Result<Arc<dyn SpellEffect>, CatalogError> {
        let name = &definition.name;

        if definition.max_uses == 0 {
            return Err(CatalogError::InvalidMaxUses { name: name.clone() });
        }

        let cooldown = definition.cooldown_seconds;
        if !cooldown.is_finite() || cooldown < 0.0 {
            return Err(CatalogError::InvalidCooldown {
                name: name.clone(),
                cooldown_seconds: cooldown,
            });
        }

        if self.by_name.contains_key(name) {
            return Err(CatalogError::DuplicateName { name: name.clone() });
        }

        self.effects
            .get(&definition.effect)
            .cloned()
            .ok_or_else(|| CatalogError::MissingEffect {
                name: name.clone(),
                effect: definition.effect.clone(),
            })
    }

    /// Validate and register a definition.
    pub fn register(&mut self, definition: SpellDefinition) -> Result<Arc<Spell>, CatalogError> {
        let effect = self.validate(&definition)?;

        let id = SpellId::new(self.spells.len() as u32);
        let spell = Arc::new(Spell::new(id, definition, effect));

        self.by_name.insert(spell.name().to_string(), id);
        self.spells.push(Arc::clone(&spell));

        debug!(%id, name = spell.name(), "spell registered");
        Ok(spell)
    }

    /// Register every spell in a JSON manifest.
    ///
    /// Fails only if the manifest itself cannot be parsed. Individual bad
    /// definitions are logged and listed in the report.
    pub fn load_manifest(&mut self, json: &str) -> Result<ManifestReport, CatalogError> {
        let manifest: CatalogManifest = serde_json::from_str(json)?;
        Ok(self.load(manifest))
    }

    /// Register every spell in an already-parsed manifest.
    pub fn load(&mut self, manifest: CatalogManifest) -> ManifestReport {
        let mut report = ManifestReport::default();

        for definition in manifest.spells {
            match self.register(definition) {
                Ok(spell) => report.loaded.push(spell.id()),
                Err(err) => {
                    warn!(error = %err, "spell refused");
                    report.rejected.push(err);
                }
            }
        }

        report
    }

    /// Get a spell by ID.
    #[must_use]
    pub fn get(&self, id: SpellId) -> Option<&Arc<Spell>> {
        self.spells.get(id.index())
    }

    /// Get a spell by name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Arc<Spell>> {
        self.by_name.get(name).and_then(|&id| self.get(id))
    }

    /// Pick a spell uniformly at random.
    ///
    /// Returns `None` if the catalog is empty.
    pub fn random(&self, rng: &mut GameRng) -> Option<&Arc<Spell>> {
        rng.gen_index(self.spells.len())
            .and_then(|index| self.spells.get(index))
    }

    /// Check if an effect key is registered.
    #[must_use]
    pub fn has_effect(&self, key: &EffectKey) -> bool {
        self.effects.contains_key(key)
    }

    /// Get the number of registered spells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Iterate spells in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Spell>> {
        self.spells.iter()
    }
}
