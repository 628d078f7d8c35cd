//! Cooldown timer.
//!
//! `Idle -> Running -> Idle`. Driven by [`Cooldown::advance`] with scaled
//! game time; it never blocks and never reads a wall clock. Cancelling a
//! running timer discards the remaining time silently.

/// Cooldown timer state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
enum CooldownState {
    #[default]
    Idle,
    Running { elapsed: f32, total: f32 },
}

/// Tick-driven cooldown timer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cooldown {
    state: CooldownState,
}

impl Cooldown {
    /// Create an idle timer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)start the timer for `seconds` of game time.
    ///
    /// A zero-length cooldown still runs until the next `advance`.
    pub fn start(&mut self, seconds: f32) {
        self.state = CooldownState::Running {
            elapsed: 0.0,
            total: seconds.max(0.0),
        };
    }

    /// Stop the timer without completing it. Returns `true` if it was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_active();
        self.state = CooldownState::Idle;
        was_running
    }

    /// Advance by `delta` game seconds.
    ///
    /// Returns `true` exactly once per run: on the call that completes it.
    pub fn advance(&mut self, delta: f32) -> bool {
        let CooldownState::Running { elapsed, total } = &mut self.state else {
            return false;
        };

        *elapsed += delta.max(0.0);
        if *elapsed >= *total {
            self.state = CooldownState::Idle;
            true
        } else {
            false
        }
    }

    /// Is the timer running?
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, CooldownState::Running { .. })
    }

    /// Completion in `[0, 1]`. An idle timer reports `1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self.state {
            CooldownState::Idle => 1.0,
            CooldownState::Running { total, .. } if total <= 0.0 => 0.0,
            CooldownState::Running { elapsed, total } => (elapsed / total).clamp(0.0, 1.0),
        }
    }

    /// Game seconds left before the timer completes.
    #[must_use]
    pub fn remaining(&self) -> f32 {
        match self.state {
            CooldownState::Idle => 0.0,
            CooldownState::Running { elapsed, total } => (total - elapsed).max(0.0),
        }
    }
}
