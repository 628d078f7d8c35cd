//! The held-spell state machine.
//!
//! States are `Empty` and `Holding`, with an orthogonal cooldown flag while
//! holding. Three transitions mutate it: [`SpellHolder::acquire`],
//! [`SpellHolder::cast`] and the release path (exhaustion, replacement or
//! [`SpellHolder::request_drop`]). [`SpellHolder::advance`] only ticks the
//! cooldown.
//!
//! ## Invariants
//!
//! - At most one spell is held.
//! - A held spell always has at least one use left: the cast that spends the
//!   last use releases the spell before returning.
//! - A cooldown only runs while a spell is held.
//!
//! All mutation goes through `&mut self`, so two cast requests can never
//! both spend the same use.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::GameContext;
use crate::effects::EffectHost;
use crate::error::CastRejection;
use crate::events::{ObserverList, RemovalReason, SpellEvent, SpellObserver, Subscription};
use crate::pickups::{DropSink, DroppedSpellRecord};
use crate::spells::{IconHandle, Spell, SpellDefinition};

use super::cooldown::Cooldown;
use super::view::HeldSpellView;

/// Result of a successful cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// The spell is still held with this many uses; its cooldown is running.
    Continued { remaining_uses: u32 },
    /// That was the last use; the spell has been released.
    Exhausted,
}

#[derive(Clone, Debug)]
struct HeldSpell {
    spell: Arc<Spell>,
    remaining_uses: u32,
}

/// How a held spell leaves the holder.
enum Release<'a> {
    Exhausted,
    Dropped(&'a mut dyn DropSink),
}

/// Owns the player's single held spell.
#[derive(Debug, Default)]
pub struct SpellHolder {
    held: Option<HeldSpell>,
    cooldown: Cooldown,
    observers: ObserverList,
}

impl SpellHolder {
    /// Create an empty holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Observers ===

    /// Subscribe an observer. It stays subscribed until it is dropped or
    /// explicitly unsubscribed.
    pub fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>) -> Subscription
    where
        O: SpellObserver + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// End a subscription early.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }

    /// Forget observers that have been dropped.
    pub fn prune_observers(&mut self) -> usize {
        self.observers.prune()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.live_count()
    }

    // === Queries ===

    /// Snapshot of the current state, as handed to observers.
    #[must_use]
    pub fn view(&self) -> HeldSpellView<'_> {
        HeldSpellView::new(
            self.held.as_ref().map(|held| &held.spell),
            self.remaining_uses(),
            &self.cooldown,
        )
    }

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    #[must_use]
    pub fn current_spell(&self) -> Option<&Arc<Spell>> {
        self.held.as_ref().map(|held| &held.spell)
    }

    #[must_use]
    pub fn current_definition(&self) -> Option<&SpellDefinition> {
        self.current_spell().map(|spell| spell.definition())
    }

    #[must_use]
    pub fn current_icon(&self) -> Option<IconHandle> {
        self.current_spell().map(|spell| spell.icon())
    }

    /// Uses left on the held spell; `0` when nothing is held.
    #[must_use]
    pub fn remaining_uses(&self) -> u32 {
        self.held.as_ref().map_or(0, |held| held.remaining_uses)
    }

    #[must_use]
    pub fn is_on_cooldown(&self) -> bool {
        self.cooldown.is_active()
    }

    /// Cooldown completion in `[0, 1]`; `1.0` when no cooldown is running.
    #[must_use]
    pub fn cooldown_progress(&self) -> f32 {
        self.cooldown.progress()
    }

    // === Transitions ===

    /// Install a spell, dropping the currently held one into `drops`.
    ///
    /// `explicit_uses` is honoured when it lies in `1..=max_uses`; otherwise
    /// the spell starts with `max_uses`. Observers see `Removed` for the old
    /// spell (if any) followed by `Added`.
    pub fn acquire(
        &mut self,
        spell: Arc<Spell>,
        explicit_uses: Option<u32>,
        drops: &mut dyn DropSink,
    ) {
        if self.held.is_some() {
            self.release(Release::Dropped(drops));
        }

        let remaining_uses = match explicit_uses {
            Some(uses) if uses > 0 && uses <= spell.max_uses() => uses,
            Some(uses) => {
                debug!(
                    uses,
                    max_uses = spell.max_uses(),
                    "explicit use count out of range; using max"
                );
                spell.max_uses()
            }
            None => spell.max_uses(),
        };

        self.cooldown.cancel();
        debug!(spell = %spell, remaining_uses, "spell acquired");
        self.held = Some(HeldSpell {
            spell,
            remaining_uses,
        });

        self.emit(SpellEvent::Added);
    }

    /// Try to cast the held spell.
    ///
    /// Checks, in order: a spell is held, no cooldown is running, the
    /// spell's effect can run in `ctx`. On success the effect is spawned into
    /// `effects` (and left to run on its own), one use is spent, and either
    /// the cooldown restarts or the exhausted spell is released.
    pub fn cast(
        &mut self,
        ctx: &GameContext,
        effects: &mut EffectHost,
    ) -> Result<CastOutcome, CastRejection> {
        let checked = match self.held.as_mut() {
            None => Err(CastRejection::NoSpellHeld),
            Some(_) if self.cooldown.is_active() => Err(CastRejection::OnCooldown {
                remaining: self.cooldown.remaining(),
            }),
            Some(held) if !held.spell.effect().can_run(ctx) => Err(CastRejection::EffectCannotRun),
            Some(held) => {
                effects.spawn(held.spell.effect().instantiate(ctx));
                held.remaining_uses -= 1;
                Ok((Arc::clone(&held.spell), held.remaining_uses))
            }
        };

        let (spell, remaining_uses) = match checked {
            Ok(cast) => cast,
            Err(reason) => {
                warn!(%reason, "cast refused");
                self.emit(SpellEvent::Denied(reason));
                return Err(reason);
            }
        };

        if remaining_uses == 0 {
            debug!(spell = %spell, "last use cast");
            self.release(Release::Exhausted);
            return Ok(CastOutcome::Exhausted);
        }

        let cooldown_seconds = spell.cooldown_seconds();
        self.cooldown.start(cooldown_seconds);
        debug!(spell = %spell, remaining_uses, cooldown_seconds, "spell cast");

        self.emit(SpellEvent::Cast {
            spell,
            remaining_uses,
            cooldown_seconds,
        });
        Ok(CastOutcome::Continued { remaining_uses })
    }

    /// [`cast`](Self::cast), reduced to whether the cast happened.
    pub fn try_cast(&mut self, ctx: &GameContext, effects: &mut EffectHost) -> bool {
        self.cast(ctx, effects).is_ok()
    }

    /// Drop the held spell into `drops`. No-op when nothing is held.
    ///
    /// Returns `true` if a spell was dropped.
    pub fn request_drop(&mut self, drops: &mut dyn DropSink) -> bool {
        if self.held.is_none() {
            debug!("drop requested with no held spell");
            return false;
        }
        self.release(Release::Dropped(drops));
        true
    }

    /// Advance the cooldown by `delta` game seconds.
    ///
    /// Returns `true` if the cooldown completed during this call, in which
    /// case observers have received `Ready`.
    pub fn advance(&mut self, delta: f32) -> bool {
        if !self.cooldown.advance(delta) {
            return false;
        }
        debug!("spell ready");
        self.emit(SpellEvent::Ready);
        true
    }

    fn release(&mut self, how: Release<'_>) {
        let Some(held) = self.held.take() else {
            return;
        };
        self.cooldown.cancel();

        let reason = match how {
            Release::Exhausted => RemovalReason::Exhausted,
            Release::Dropped(drops) => {
                let record = DroppedSpellRecord::new(Arc::clone(&held.spell), held.remaining_uses);
                drops.materialize(record);
                RemovalReason::Dropped
            }
        };

        debug!(spell = %held.spell, ?reason, "spell released");
        self.emit(SpellEvent::Removed {
            spell: held.spell,
            reason,
        });
    }

    fn emit(&self, event: SpellEvent) {
        self.observers.notify(&event, &self.view());
    }
}
