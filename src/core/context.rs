//! Game context read by spell effects.
//!
//! Effects decide whether they may run, and apply themselves, against this
//! context. It is deliberately small: the player's health and position are
//! all the bundled effect needs, and hosts embedding the crate keep it in
//! sync with their own world each frame.

use serde::{Deserialize, Serialize};

/// A point in world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset this position (builder pattern).
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Current and maximum hit points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HealthRecord")]
pub struct Health {
    current: u32,
    max: u32,
}

/// Unchecked wire form of [`Health`]; deserialization clamps through `new`.
#[derive(Deserialize)]
struct HealthRecord {
    current: u32,
    max: u32,
}

impl From<HealthRecord> for Health {
    fn from(record: HealthRecord) -> Self {
        Self::new(record.current, record.max)
    }
}

impl Health {
    /// Create health, clamping `current` to `max`.
    #[must_use]
    pub fn new(current: u32, max: u32) -> Self {
        Self {
            current: current.min(max),
            max,
        }
    }

    /// Full health at the given maximum.
    #[must_use]
    pub fn full(max: u32) -> Self {
        Self::new(max, max)
    }

    #[must_use]
    pub fn current(&self) -> u32 {
        self.current
    }

    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Is the holder below maximum health?
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.current < self.max
    }

    /// Heal up to `amount`, never past max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max.saturating_sub(self.current));
        self.current += healed;
        healed
    }

    /// Take damage, saturating at zero.
    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// The player as seen by spell effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub health: Health,
    pub position: Position,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            health: Health::full(10),
            position: Position::default(),
        }
    }
}

/// Everything an effect may read or mutate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    pub player: PlayerState,
}

impl GameContext {
    /// Create a context around a player.
    #[must_use]
    pub fn new(player: PlayerState) -> Self {
        Self { player }
    }

    /// Set player health (builder pattern).
    #[must_use]
    pub fn with_health(mut self, health: Health) -> Self {
        self.player.health = health;
        self
    }

    /// Set player position (builder pattern).
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.player.position = position;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps() {
        let health = Health::new(15, 10);
        assert_eq!(health.current(), 10);
        assert!(!health.is_missing());
    }

    #[test]
    fn test_deserialized_health_is_clamped() {
        let mut health: Health = serde_json::from_str(r#"{"current":20,"max":10}"#).unwrap();
        assert_eq!(health, Health::full(10));
        assert_eq!(health.heal(3), 0);

        let json = serde_json::to_string(&Health::new(4, 10)).unwrap();
        assert_eq!(serde_json::from_str::<Health>(&json).unwrap(), Health::new(4, 10));
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut health = Health::new(8, 10);
        assert_eq!(health.heal(5), 2);
        assert_eq!(health.current(), 10);
        assert_eq!(health.heal(1), 0);
    }

    #[test]
    fn test_damage_saturates() {
        let mut health = Health::full(3);
        health.damage(5);
        assert_eq!(health.current(), 0);
        assert!(health.is_missing());
    }

    #[test]
    fn test_context_builder() {
        let ctx = GameContext::default()
            .with_health(Health::new(4, 10))
            .with_position(Position::new(1.0, 2.0));

        assert_eq!(ctx.player.health.current(), 4);
        assert_eq!(ctx.player.position, Position::new(1.0, 2.0));
        assert_eq!(ctx.player.position.offset(0.5, -1.0), Position::new(1.5, 1.0));
    }
}
