//! Presentation-side observers.
//!
//! Rendering and audio stay outside the crate; what lives here is the state
//! a spell button needs to decide what to draw and which cues to play.

mod button;

pub use button::{ButtonCue, ButtonDisplay, SoundCue, SpellButton};
