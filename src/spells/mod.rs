//! Spell system: definitions and the validated catalog.
//!
//! ## Key Types
//!
//! - `SpellId`: Identifier assigned by the catalog
//! - `SpellDefinition`: Authored data (cooldown, uses, icon, effect key)
//! - `Spell`: A definition bound to its effect prototype
//! - `SpellCatalog`: Validated registry, manifest loading, random rolls

pub mod catalog;
pub mod definition;

pub use catalog::{CatalogManifest, ManifestReport, SpellCatalog};
pub use definition::{IconHandle, Spell, SpellDefinition, SpellId};
