//! Held-spell lifecycle events.
//!
//! Events are published synchronously by the holder: every observer has run
//! before the operation that emitted the event returns.

use std::fmt;
use std::sync::Arc;

use crate::error::CastRejection;
use crate::spells::Spell;

/// Why a held spell went away.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemovalReason {
    /// The last use was cast.
    Exhausted,
    /// Dropped voluntarily or replaced by a new pickup.
    Dropped,
}

impl RemovalReason {
    #[must_use]
    pub fn is_exhaustion(self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Something that happened to the held spell.
///
/// Observers receive the event together with a view of the holder's state
/// after the change, so `Added` needs no payload.
#[derive(Clone, Debug, PartialEq)]
pub enum SpellEvent {
    /// A spell was installed.
    Added,

    /// A cast succeeded and the spell has uses left.
    /// A cast that spends the last use emits `Removed` instead.
    Cast {
        spell: Arc<Spell>,
        remaining_uses: u32,
        cooldown_seconds: f32,
    },

    /// The held spell was released.
    Removed {
        spell: Arc<Spell>,
        reason: RemovalReason,
    },

    /// The cooldown ran out; the spell can be cast again.
    Ready,

    /// A cast request was refused. The held state did not change.
    Denied(CastRejection),
}

impl SpellEvent {
    /// Short name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Cast { .. } => "cast",
            Self::Removed { .. } => "removed",
            Self::Ready => "ready",
            Self::Denied(_) => "denied",
        }
    }

    /// `Some(true)` for a removal by exhaustion, `Some(false)` for any other
    /// removal, `None` for non-removal events.
    #[must_use]
    pub fn due_to_exhaustion(&self) -> Option<bool> {
        match self {
            Self::Removed { reason, .. } => Some(reason.is_exhaustion()),
            _ => None,
        }
    }
}

impl fmt::Display for SpellEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "Added"),
            Self::Cast {
                spell,
                remaining_uses,
                cooldown_seconds,
            } => write!(f, "Cast({spell}, uses={remaining_uses}, cooldown={cooldown_seconds}s)"),
            Self::Removed { spell, reason } => write!(f, "Removed({spell}, {reason:?})"),
            Self::Ready => write!(f, "Ready"),
            Self::Denied(reason) => write!(f, "Denied({reason})"),
        }
    }
}
