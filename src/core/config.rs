//! Runtime configuration.
//!
//! `SpellConfig` gathers the knobs a host sets once at startup: the RNG seed
//! for random pickups, the initial time scale, the pickup prefab key and the
//! spell button's transition timings. All fields have defaults, so a partial
//! JSON document is enough.

use serde::{Deserialize, Serialize};

/// Asset key pickups are spawned with unless configured otherwise.
pub const DEFAULT_PICKUP_PREFAB: &str = "SpellPrefab";

/// Spell button transition timings, in game seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenterTimings {
    /// Length of the press animation. The cooldown bar starts filling, and an
    /// exhausted button starts fading, only after it.
    pub press_duration: f32,

    /// Length of the removal fade.
    pub remove_duration: f32,
}

impl Default for PresenterTimings {
    fn default() -> Self {
        Self {
            press_duration: 0.2,
            remove_duration: 0.5,
        }
    }
}

/// Spell system configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Seed for random pickup rolls.
    /// Same seed produces the same rolls.
    pub seed: u64,

    /// Initial game time multiplier.
    pub time_scale: f32,

    /// Prefab key used to materialize dropped spells.
    /// `None` means no prefab could be resolved; drops are then lost.
    pub pickup_prefab: Option<String>,

    /// Spell button timings.
    pub presenter: PresenterTimings,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            pickup_prefab: Some(DEFAULT_PICKUP_PREFAB.to_string()),
            presenter: PresenterTimings::default(),
        }
    }
}

impl SpellConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the initial time scale.
    #[must_use]
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }

    /// Set (or clear) the pickup prefab key.
    #[must_use]
    pub fn with_pickup_prefab(mut self, prefab: Option<&str>) -> Self {
        self.pickup_prefab = prefab.map(str::to_string);
        self
    }

    /// Set the spell button timings.
    #[must_use]
    pub fn with_presenter(mut self, presenter: PresenterTimings) -> Self {
        self.presenter = presenter;
        self
    }
}
