//! Observer registration.
//!
//! The holder owns an [`ObserverList`]. Observers are stored as weak
//! references, so a subscription lasts exactly as long as the observer's own
//! `Rc`: dropping the observer unsubscribes it. `unsubscribe` ends it early.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;
use tracing::warn;

use crate::holder::HeldSpellView;

use super::event::SpellEvent;

/// Receives held-spell events.
pub trait SpellObserver {
    /// Called once per event, in registration order.
    ///
    /// `held` is the holder's state after the change that produced `event`.
    fn on_spell_event(&mut self, event: &SpellEvent, held: &HeldSpellView<'_>);
}

/// Handle returned by [`ObserverList::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping the handle loses the ability to unsubscribe early"]
pub struct Subscription(u64);

impl Subscription {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

struct Entry {
    id: Subscription,
    observer: Weak<RefCell<dyn SpellObserver>>,
}

/// Ordered list of observers.
#[derive(Default)]
pub struct ObserverList {
    /// Registration order; most holders have a handful of observers.
    entries: SmallVec<[Entry; 4]>,
    next_id: u64,
}

impl ObserverList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer after all existing ones.
    pub fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>) -> Subscription
    where
        O: SpellObserver + 'static,
    {
        self.prune();

        let id = Subscription(self.next_id);
        self.next_id += 1;

        let observer: Weak<RefCell<O>> = Rc::downgrade(observer);
        let observer: Weak<RefCell<dyn SpellObserver>> = observer;
        self.entries.push(Entry { id, observer });
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != subscription);
        self.entries.len() != before
    }

    /// Deliver an event to every live observer.
    ///
    /// An observer that is already borrowed (it is itself mid-callback)
    /// misses the event.
    pub fn notify(&self, event: &SpellEvent, held: &HeldSpellView<'_>) {
        for entry in &self.entries {
            let Some(observer) = entry.observer.upgrade() else {
                continue;
            };

            let borrowed = observer.try_borrow_mut();
            match borrowed {
                Ok(mut observer) => observer.on_spell_event(event, held),
                Err(_) => warn!(
                    subscription = entry.id.raw(),
                    event = event.kind(),
                    "observer busy; event not delivered"
                ),
            };
        }
    }

    /// Drop entries whose observer no longer exists. Returns how many.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.observer.strong_count() > 0);
        before - self.entries.len()
    }

    /// Number of observers still alive.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.observer.strong_count() > 0)
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }
}

impl std::fmt::Debug for ObserverList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverList")
            .field("entries", &self.entries.len())
            .field("live", &self.live_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holder::Cooldown;

    #[derive(Default)]
    struct Recorder {
        tag: &'static str,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl SpellObserver for Recorder {
        fn on_spell_event(&mut self, event: &SpellEvent, _held: &HeldSpellView<'_>) {
            self.log.borrow_mut().push(format!("{}:{}", self.tag, event.kind()));
        }
    }

    fn recorder(tag: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Rc<RefCell<Recorder>> {
        Rc::new(RefCell::new(Recorder {
            tag,
            log: Rc::clone(log),
        }))
    }

    fn empty_view(cooldown: &Cooldown) -> HeldSpellView<'_> {
        HeldSpellView::new(None, 0, cooldown)
    }

    #[test]
    fn test_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();
        let a = recorder("a", &log);
        let b = recorder("b", &log);

        let _ = list.subscribe(&a);
        let _ = list.subscribe(&b);

        let cooldown = Cooldown::new();
        list.notify(&SpellEvent::Added, &empty_view(&cooldown));
        list.notify(&SpellEvent::Ready, &empty_view(&cooldown));

        assert_eq!(*log.borrow(), vec!["a:added", "b:added", "a:ready", "b:ready"]);
    }

    #[test]
    fn test_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();
        let a = recorder("a", &log);
        let b = recorder("b", &log);

        let sub_a = list.subscribe(&a);
        let _ = list.subscribe(&b);

        assert!(list.unsubscribe(sub_a));
        assert!(!list.unsubscribe(sub_a));

        let cooldown = Cooldown::new();
        list.notify(&SpellEvent::Added, &empty_view(&cooldown));
        assert_eq!(*log.borrow(), vec!["b:added"]);
    }

    #[test]
    fn test_dropped_observer_is_skipped_and_pruned() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();
        let a = recorder("a", &log);
        let b = recorder("b", &log);

        let _ = list.subscribe(&a);
        let _ = list.subscribe(&b);
        drop(a);

        assert_eq!(list.live_count(), 1);

        let cooldown = Cooldown::new();
        list.notify(&SpellEvent::Ready, &empty_view(&cooldown));
        assert_eq!(*log.borrow(), vec!["b:ready"]);

        assert_eq!(list.prune(), 1);
        drop(b);
        assert!(list.is_empty());
    }

    #[derive(Default)]
    struct Counter {
        events: usize,
    }

    impl SpellObserver for Counter {
        fn on_spell_event(&mut self, _event: &SpellEvent, _held: &HeldSpellView<'_>) {
            self.events += 1;
        }
    }

    #[test]
    fn test_mixed_observer_types() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();
        let a = recorder("a", &log);
        let counter = Rc::new(RefCell::new(Counter::default()));

        let _ = list.subscribe(&a);
        let sub_counter = list.subscribe(&counter);
        assert_eq!(list.live_count(), 2);

        let cooldown = Cooldown::new();
        list.notify(&SpellEvent::Added, &empty_view(&cooldown));
        assert!(list.unsubscribe(sub_counter));
        list.notify(&SpellEvent::Ready, &empty_view(&cooldown));

        assert_eq!(*log.borrow(), vec!["a:added", "a:ready"]);
        assert_eq!(counter.borrow().events, 1);
    }

    #[test]
    fn test_busy_observer_misses_event() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut list = ObserverList::new();
        let a = recorder("a", &log);
        let _ = list.subscribe(&a);

        let _guard = a.borrow_mut();
        let cooldown = Cooldown::new();
        list.notify(&SpellEvent::Added, &empty_view(&cooldown));

        assert!(log.borrow().is_empty());
    }
}
