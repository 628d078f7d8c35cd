//! Heal-over-time effect.
//!
//! Heals the player a fixed amount per pulse, with a delay between pulses.
//! The first pulse lands on the instance's first frame. Only runnable while
//! the player is missing health.

use tracing::debug;

use crate::core::GameContext;

use super::{EffectInstance, EffectStatus, SpellEffect};

/// Regeneration prototype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Regeneration {
    /// Health restored per pulse.
    pub heal_per_pulse: u32,
    /// Number of pulses.
    pub pulses: u32,
    /// Game seconds between pulses.
    pub interval: f32,
}

impl Default for Regeneration {
    fn default() -> Self {
        Self {
            heal_per_pulse: 1,
            pulses: 4,
            interval: 1.5,
        }
    }
}

impl Regeneration {
    /// Set the number of pulses (builder pattern).
    #[must_use]
    pub fn with_pulses(mut self, pulses: u32) -> Self {
        self.pulses = pulses;
        self
    }

    /// Set the delay between pulses (builder pattern).
    #[must_use]
    pub fn with_interval(mut self, interval: f32) -> Self {
        self.interval = interval.max(0.0);
        self
    }
}

impl SpellEffect for Regeneration {
    fn can_run(&self, ctx: &GameContext) -> bool {
        ctx.player.health.is_missing()
    }

    fn instantiate(&self, _ctx: &GameContext) -> Box<dyn EffectInstance> {
        Box::new(RegenerationInstance {
            heal_per_pulse: self.heal_per_pulse,
            pulses_left: self.pulses,
            interval: self.interval,
            until_next: 0.0,
        })
    }
}

/// A running regeneration.
#[derive(Clone, Debug, PartialEq)]
pub struct RegenerationInstance {
    heal_per_pulse: u32,
    pulses_left: u32,
    interval: f32,
    until_next: f32,
}

impl RegenerationInstance {
    #[must_use]
    pub fn pulses_left(&self) -> u32 {
        self.pulses_left
    }
}

impl EffectInstance for RegenerationInstance {
    fn advance(&mut self, delta: f32, ctx: &mut GameContext) -> EffectStatus {
        self.until_next -= delta;

        while self.pulses_left > 0 && self.until_next <= 0.0 {
            let healed = ctx.player.health.heal(self.heal_per_pulse);
            self.pulses_left -= 1;
            self.until_next += self.interval;
            debug!(healed, pulses_left = self.pulses_left, "regeneration pulse");
        }

        // Linger through the last interval before finishing
        if self.pulses_left == 0 && self.until_next <= 0.0 {
            EffectStatus::Finished
        } else {
            EffectStatus::Running
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Health;

    fn hurt(current: u32) -> GameContext {
        GameContext::default().with_health(Health::new(current, 10))
    }

    #[test]
    fn test_can_run_only_when_missing_health() {
        let regen = Regeneration::default();
        assert!(regen.can_run(&hurt(5)));
        assert!(!regen.can_run(&hurt(10)));
    }

    #[test]
    fn test_heals_over_time() {
        let regen = Regeneration::default();
        let mut ctx = hurt(2);
        let mut instance = regen.instantiate(&ctx);

        // First pulse lands immediately
        assert_eq!(instance.advance(0.0, &mut ctx), EffectStatus::Running);
        assert_eq!(ctx.player.health.current(), 3);

        // Not yet
        instance.advance(1.0, &mut ctx);
        assert_eq!(ctx.player.health.current(), 3);

        instance.advance(0.5, &mut ctx);
        assert_eq!(ctx.player.health.current(), 4);

        instance.advance(1.5, &mut ctx);
        instance.advance(1.5, &mut ctx);
        assert_eq!(ctx.player.health.current(), 6);

        // Last interval elapses, then the instance finishes
        assert_eq!(instance.advance(1.5, &mut ctx), EffectStatus::Finished);
        assert_eq!(ctx.player.health.current(), 6);
    }

    #[test]
    fn test_large_delta_catches_up() {
        let regen = Regeneration::default().with_pulses(3).with_interval(1.0);
        let mut ctx = hurt(0);
        let mut instance = regen.instantiate(&ctx);

        assert_eq!(instance.advance(10.0, &mut ctx), EffectStatus::Finished);
        assert_eq!(ctx.player.health.current(), 3);
    }

    #[test]
    fn test_keeps_running_at_full_health() {
        // The effect checks can_run only at cast time
        let regen = Regeneration::default().with_pulses(2);
        let mut ctx = hurt(9);
        let mut instance = regen.instantiate(&ctx);

        instance.advance(0.0, &mut ctx);
        assert_eq!(ctx.player.health.current(), 10);
        assert_eq!(instance.advance(1.5, &mut ctx), EffectStatus::Running);
        assert_eq!(ctx.player.health.current(), 10);
    }
}
