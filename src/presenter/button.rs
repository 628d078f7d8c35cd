//! Headless spell button.
//!
//! Mirrors what the on-screen spell button shows and which animations and
//! sounds it asks for, without rendering anything. A host drains
//! [`SpellButton::drain_cues`] each frame and plays them.
//!
//! The removal transition is the delicate part. Removing the button takes
//! time (an optional press wait, then a fade), and a new spell may arrive in
//! the middle of it. Such an acquisition only sets a flag. When the fade ends
//! the button re-reads the holder through the view passed to
//! [`SpellButton::advance`], so whatever happened to the spell during the
//! fade (a cast, another pickup, a drop) is what gets shown.

use tracing::warn;

use crate::core::PresenterTimings;
use crate::events::{SpellEvent, SpellObserver};
use crate::holder::HeldSpellView;
use crate::spells::IconHandle;

/// Sounds the button asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Recharged,
    Denied,
    Drop,
}

/// Something the host should play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonCue {
    Activate,
    Cast,
    Denied,
    Remove,
    Sound(SoundCue),
}

/// What the button currently shows.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonDisplay {
    pub visible: bool,
    pub icon: Option<IconHandle>,
    pub uses_text: String,
    /// Cooldown bar fill in `[0, 1]`; full when ready.
    pub fill: f32,
    pub interactable: bool,
}

impl Default for ButtonDisplay {
    fn default() -> Self {
        Self {
            visible: false,
            icon: None,
            uses_text: String::new(),
            fill: 1.0,
            interactable: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Removal {
    Idle,
    /// Letting the press animation of the final cast finish.
    AwaitingPress { left: f32 },
    Fading { left: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Bar {
    Idle,
    Delay { left: f32, total: f32 },
    Filling { elapsed: f32, total: f32 },
}

/// Observer driving the spell button.
#[derive(Clone, Debug)]
pub struct SpellButton {
    timings: PresenterTimings,
    display: ButtonDisplay,
    removal: Removal,
    bar: Bar,
    /// A spell was added while the removal was running.
    queued: bool,
    cues: Vec<ButtonCue>,
}

impl SpellButton {
    #[must_use]
    pub fn new(timings: PresenterTimings) -> Self {
        Self {
            timings,
            display: ButtonDisplay::default(),
            removal: Removal::Idle,
            bar: Bar::Idle,
            queued: false,
            cues: Vec::new(),
        }
    }

    #[must_use]
    pub fn display(&self) -> &ButtonDisplay {
        &self.display
    }

    /// Is a removal transition in progress?
    #[must_use]
    pub fn is_removing(&self) -> bool {
        self.removal != Removal::Idle
    }

    /// Is an acquisition waiting for the removal to finish?
    #[must_use]
    pub fn has_queued_acquisition(&self) -> bool {
        self.queued
    }

    /// Take the cues emitted since the last call.
    pub fn drain_cues(&mut self) -> Vec<ButtonCue> {
        std::mem::take(&mut self.cues)
    }

    /// Advance transitions by `delta` game seconds.
    ///
    /// `held` is the holder's current state; it is read when a removal
    /// finishes with an acquisition queued.
    pub fn advance(&mut self, delta: f32, held: &HeldSpellView<'_>) {
        // Bar first: a spell shown by a finishing removal already has this
        // frame's cooldown progress
        self.advance_bar(delta);
        self.advance_removal(delta, held);
    }

    fn advance_removal(&mut self, delta: f32, held: &HeldSpellView<'_>) {
        match &mut self.removal {
            Removal::Idle => {}
            Removal::AwaitingPress { left } => {
                *left -= delta;
                if *left <= 0.0 {
                    self.begin_fade();
                }
            }
            Removal::Fading { left } => {
                *left -= delta;
                if *left <= 0.0 {
                    self.finish_removal(held);
                }
            }
        }
    }

    fn advance_bar(&mut self, delta: f32) {
        match &mut self.bar {
            Bar::Idle => {}
            Bar::Delay { left, total } => {
                *left -= delta;
                if *left <= 0.0 {
                    let total = *total;
                    self.bar = Bar::Filling { elapsed: 0.0, total };
                    self.display.fill = 0.0;
                    self.display.interactable = false;
                }
            }
            Bar::Filling { elapsed, total } => {
                *elapsed += delta;
                // Ready is what completes the bar; never fill past it
                self.display.fill = if *total > 0.0 {
                    (*elapsed / *total).min(1.0)
                } else {
                    1.0
                };
            }
        }
    }

    fn show(&mut self, held: &HeldSpellView<'_>) {
        self.display = ButtonDisplay {
            visible: true,
            icon: held.current_icon(),
            uses_text: held.remaining_uses().to_string(),
            ..ButtonDisplay::default()
        };
        self.bar = Bar::Idle;

        if held.is_on_cooldown() {
            let total = held.current_definition().map_or(0.0, |def| def.cooldown_seconds);
            let progress = held.cooldown_progress();
            self.bar = Bar::Filling {
                elapsed: progress * total,
                total,
            };
            self.display.fill = progress;
            self.display.interactable = false;
        }
        self.cues.push(ButtonCue::Activate);
    }

    fn reset_bar(&mut self) {
        self.bar = Bar::Idle;
        self.display.fill = 1.0;
        self.display.interactable = true;
    }

    fn begin_fade(&mut self) {
        self.removal = Removal::Fading {
            left: self.timings.remove_duration,
        };
        self.reset_bar();
        self.cues.push(ButtonCue::Remove);
    }

    fn finish_removal(&mut self, held: &HeldSpellView<'_>) {
        self.removal = Removal::Idle;
        self.display = ButtonDisplay::default();

        let queued = std::mem::take(&mut self.queued);
        if queued && held.is_holding() {
            self.show(held);
        }
    }
}

impl Default for SpellButton {
    fn default() -> Self {
        Self::new(PresenterTimings::default())
    }
}

impl SpellObserver for SpellButton {
    fn on_spell_event(&mut self, event: &SpellEvent, held: &HeldSpellView<'_>) {
        match event {
            SpellEvent::Added => {
                if self.is_removing() {
                    self.queued = true;
                } else {
                    self.show(held);
                }
            }
            // Drawn from the holder's state once the removal ends
            SpellEvent::Cast { .. } | SpellEvent::Ready if self.is_removing() => {}
            SpellEvent::Cast {
                remaining_uses,
                cooldown_seconds,
                ..
            } => {
                self.cues.push(ButtonCue::Cast);
                self.display.uses_text = remaining_uses.to_string();
                self.bar = Bar::Delay {
                    left: self.timings.press_duration,
                    total: *cooldown_seconds,
                };
            }
            SpellEvent::Ready => {
                self.reset_bar();
                self.cues.push(ButtonCue::Sound(SoundCue::Recharged));
            }
            SpellEvent::Denied(_) => {
                self.cues.push(ButtonCue::Sound(SoundCue::Denied));
                self.cues.push(ButtonCue::Denied);
            }
            SpellEvent::Removed { reason, .. } => {
                if self.is_removing() {
                    warn!("spell button is already being removed");
                    return;
                }
                if reason.is_exhaustion() {
                    // The final cast still gets its press animation
                    self.cues.push(ButtonCue::Cast);
                    self.removal = Removal::AwaitingPress {
                        left: self.timings.press_duration,
                    };
                } else {
                    self.cues.push(ButtonCue::Sound(SoundCue::Drop));
                    self.begin_fade();
                }
            }
        }
    }
}
