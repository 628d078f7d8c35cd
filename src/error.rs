//! Error types.
//!
//! Two families, both absorbed locally rather than propagated as crashes:
//!
//! - [`CatalogError`]: configuration problems found while registering a
//!   spell. The offending spell is refused; the rest of the catalog loads.
//! - [`CastRejection`]: expected, recoverable reasons a cast did not happen.
//!   The held state is untouched and observers get a `Denied` event.

use crate::effects::EffectKey;

/// A spell definition that cannot be registered.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("spell `{name}` must allow at least one use")]
    InvalidMaxUses { name: String },

    #[error("spell `{name}` has invalid cooldown {cooldown_seconds}")]
    InvalidCooldown { name: String, cooldown_seconds: f32 },

    #[error("spell `{name}` references unregistered effect `{effect}`")]
    MissingEffect { name: String, effect: EffectKey },

    #[error("spell `{name}` is already registered")]
    DuplicateName { name: String },

    #[error("malformed catalog manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl CatalogError {
    /// Name of the rejected spell, if the error concerns a single spell.
    #[must_use]
    pub fn spell_name(&self) -> Option<&str> {
        match self {
            Self::InvalidMaxUses { name }
            | Self::InvalidCooldown { name, .. }
            | Self::MissingEffect { name, .. }
            | Self::DuplicateName { name } => Some(name),
            Self::Manifest(_) => None,
        }
    }
}

/// Why a cast request was refused.
///
/// Checks run in declaration order and stop at the first failure.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum CastRejection {
    #[error("no spell is held")]
    NoSpellHeld,

    #[error("spell is on cooldown ({remaining:.2}s left)")]
    OnCooldown { remaining: f32 },

    #[error("spell cannot run in the current game context")]
    EffectCannotRun,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_messages() {
        let err = CatalogError::MissingEffect {
            name: "Regeneration".into(),
            effect: EffectKey::new("regen"),
        };
        assert_eq!(
            err.to_string(),
            "spell `Regeneration` references unregistered effect `regen`"
        );
        assert_eq!(err.spell_name(), Some("Regeneration"));
    }

    #[test]
    fn test_manifest_error_has_no_spell() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CatalogError::from(parse);
        assert!(err.spell_name().is_none());
        assert!(err.to_string().starts_with("malformed catalog manifest"));
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(CastRejection::NoSpellHeld.to_string(), "no spell is held");
        assert_eq!(
            CastRejection::OnCooldown { remaining: 1.5 }.to_string(),
            "spell is on cooldown (1.50s left)"
        );
    }
}
