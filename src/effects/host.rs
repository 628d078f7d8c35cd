//! Owner of running effect instances.

use tracing::trace;

use crate::core::GameContext;

use super::{EffectInstance, EffectStatus};

/// Keeps spawned effects alive until they finish.
///
/// The holder spawns into the host and never looks back; the host advances
/// every instance each frame, in spawn order, and drops the finished ones.
#[derive(Debug, Default)]
pub struct EffectHost {
    active: Vec<Box<dyn EffectInstance>>,
    spawned_total: u64,
}

impl EffectHost {
    /// Create an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a freshly spawned instance.
    pub fn spawn(&mut self, instance: Box<dyn EffectInstance>) {
        trace!(?instance, "effect spawned");
        self.active.push(instance);
        self.spawned_total += 1;
    }

    /// Advance every running instance, dropping the ones that finish.
    pub fn advance(&mut self, delta: f32, ctx: &mut GameContext) {
        self.active
            .retain_mut(|instance| instance.advance(delta, ctx) == EffectStatus::Running);
    }

    /// Number of instances still running.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of instances ever spawned into this host.
    #[must_use]
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Countdown(u32);

    impl EffectInstance for Countdown {
        fn advance(&mut self, _delta: f32, _ctx: &mut GameContext) -> EffectStatus {
            self.0 = self.0.saturating_sub(1);
            if self.0 == 0 {
                EffectStatus::Finished
            } else {
                EffectStatus::Running
            }
        }
    }

    #[test]
    fn test_instances_outlive_spawn_until_finished() {
        let mut host = EffectHost::new();
        let mut ctx = GameContext::default();

        host.spawn(Box::new(Countdown(1)));
        host.spawn(Box::new(Countdown(3)));
        assert_eq!(host.active_count(), 2);

        host.advance(0.1, &mut ctx);
        assert_eq!(host.active_count(), 1);

        host.advance(0.1, &mut ctx);
        host.advance(0.1, &mut ctx);
        assert!(host.is_idle());
        assert_eq!(host.spawned_total(), 2);
    }
}
