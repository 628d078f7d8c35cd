//! Scaled game time.
//!
//! Cooldowns, running effects and button transitions all advance by *game*
//! time, never wall-clock time. `TimeScale` turns the real frame delta handed
//! in by the scheduler into game time, so pause and slow motion affect every
//! timer in the same way.

use serde::{Deserialize, Serialize};

/// Game-wide time multiplier.
///
/// A scale of `1.0` is real time, `0.5` is slow motion and `0.0` is paused.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    scale: f32,
    /// Scale to restore on `resume()`.
    resume_to: f32,
}

impl TimeScale {
    /// Create a time scale. Negative or non-finite values clamp to `0.0`.
    #[must_use]
    pub fn new(scale: f32) -> Self {
        let scale = sanitize(scale);
        Self {
            scale,
            resume_to: if scale > 0.0 { scale } else { 1.0 },
        }
    }

    /// Current multiplier.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the multiplier.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = sanitize(scale);
        if self.scale > 0.0 {
            self.resume_to = self.scale;
        }
    }

    /// Freeze game time.
    pub fn pause(&mut self) {
        self.scale = 0.0;
    }

    /// Restore the last non-zero multiplier.
    pub fn resume(&mut self) {
        self.scale = self.resume_to;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.scale == 0.0
    }

    /// Convert a real frame delta into game time.
    #[must_use]
    pub fn scaled(&self, real_delta: f32) -> f32 {
        sanitize(real_delta) * self.scale
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::new(1.0)
    }
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_real_time() {
        let clock = TimeScale::default();
        assert_eq!(clock.scaled(0.25), 0.25);
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_slow_motion() {
        let clock = TimeScale::new(0.5);
        assert_eq!(clock.scaled(1.0), 0.5);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut clock = TimeScale::new(0.5);
        clock.pause();
        assert!(clock.is_paused());
        assert_eq!(clock.scaled(1.0), 0.0);

        clock.resume();
        assert_eq!(clock.scale(), 0.5);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut clock = TimeScale::new(-2.0);
        assert_eq!(clock.scale(), 0.0);

        clock.set_scale(f32::NAN);
        assert_eq!(clock.scale(), 0.0);

        // Resume falls back to real time when no positive scale was ever set
        clock.resume();
        assert_eq!(clock.scale(), 1.0);

        assert_eq!(clock.scaled(-1.0), 0.0);
        assert_eq!(clock.scaled(f32::INFINITY), 0.0);
    }
}
