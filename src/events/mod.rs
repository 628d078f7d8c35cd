//! Event publishing for the held spell.
//!
//! UI, audio and animation collaborators subscribe to the holder and react
//! to [`SpellEvent`]s. Delivery is synchronous and in registration order.
//!
//! ## Example Usage
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use spell_slot::events::{SpellEvent, SpellObserver};
//! use spell_slot::holder::{HeldSpellView, SpellHolder};
//!
//! #[derive(Default)]
//! struct Counter(usize);
//!
//! impl SpellObserver for Counter {
//!     fn on_spell_event(&mut self, _event: &SpellEvent, _held: &HeldSpellView<'_>) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut holder = SpellHolder::new();
//! let counter = Rc::new(RefCell::new(Counter::default()));
//! let _subscription = holder.subscribe(&counter);
//!
//! // Casting with nothing held is refused, and observers hear about it
//! assert!(!holder.try_cast(&Default::default(), &mut Default::default()));
//! assert_eq!(counter.borrow().0, 1);
//! ```

mod event;
mod observers;

pub use event::{RemovalReason, SpellEvent};
pub use observers::{ObserverList, SpellObserver, Subscription};
