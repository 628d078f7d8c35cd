//! Spell effects: the capability contract, running instances, and the host
//! that owns them.
//!
//! ## Key Types
//!
//! - [`EffectKey`]: Name a catalog manifest uses to reference an effect
//! - [`SpellEffect`]: Effect prototype. Every prototype answers
//!   [`SpellEffect::can_run`], so the check is enforced by the type system
//!   at registration time rather than looked up per cast
//! - [`EffectInstance`]: A spawned effect, advanced once per frame until it
//!   reports [`EffectStatus::Finished`]
//! - [`EffectHost`]: Fire-and-forget owner of running instances
//! - [`Regeneration`]: The bundled heal-over-time effect
//!
//! The holder never waits on an instance. A cast spawns it into the host and
//! moves on; the instance may outlive the spell that produced it.

mod host;
mod regeneration;

pub use host::EffectHost;
pub use regeneration::{Regeneration, RegenerationInstance};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::GameContext;

/// Name under which an effect prototype is registered.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectKey(String);

impl EffectKey {
    /// Create a new effect key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EffectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EffectKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Result of advancing an effect instance by one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectStatus {
    /// Keep advancing next frame.
    Running,
    /// Done; the host drops the instance.
    Finished,
}

/// An effect prototype referenced by spell definitions.
///
/// Prototypes are immutable and shared by every spell that references them.
pub trait SpellEffect: fmt::Debug + Send + Sync {
    /// Can this effect legally run right now?
    ///
    /// Must be a pure query: no mutation, no I/O.
    fn can_run(&self, ctx: &GameContext) -> bool;

    /// Spawn a running instance of this effect.
    ///
    /// Only called after `can_run` returned `true` for the same context.
    fn instantiate(&self, ctx: &GameContext) -> Box<dyn EffectInstance>;
}

/// A spawned effect. Manages its own lifetime.
pub trait EffectInstance: fmt::Debug {
    /// Advance by `delta` game seconds.
    fn advance(&mut self, delta: f32, ctx: &mut GameContext) -> EffectStatus;
}
