//! Per-player frame driver.
//!
//! `SpellRuntime` owns one player's holder together with everything the
//! holder talks to: the catalog, the pickup field, running effects, the game
//! context, the time scale and the pickup RNG. Input and UI code get a
//! `&mut SpellRuntime` (there is no global instance) and use its command
//! and query surface.
//!
//! ## Frame order
//!
//! [`SpellRuntime::frame`] applies the frame's commands in order, then
//! advances the cooldown, then running effects. A cast that spends the last
//! use has already released the spell when the cooldown is ticked, and a
//! cooldown that completes during a frame only admits casts from the next
//! frame on.
//!
//! ```
//! use std::sync::Arc;
//!
//! use spell_slot::core::{GameContext, Health, SpellConfig};
//! use spell_slot::effects::Regeneration;
//! use spell_slot::runtime::{Command, SpellRuntime};
//! use spell_slot::spells::{SpellCatalog, SpellDefinition};
//!
//! let mut catalog = SpellCatalog::new();
//! catalog.register_effect("regeneration", Regeneration::default());
//! catalog
//!     .register(SpellDefinition::new("Regeneration", "regeneration").with_max_uses(2))
//!     .unwrap();
//!
//! let ctx = GameContext::default().with_health(Health::new(5, 10));
//! let mut runtime = SpellRuntime::new(SpellConfig::default(), Arc::new(catalog), ctx);
//!
//! let pickup = runtime.spawn_random_pickup(Default::default()).unwrap();
//! let report = runtime.frame(0.016, &[Command::Collect(pickup), Command::Cast]);
//!
//! assert_eq!(report.collected.as_slice(), &[pickup]);
//! assert_eq!(runtime.remaining_uses(), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{GameContext, GameRng, Position, SpellConfig, TimeScale};
use crate::effects::EffectHost;
use crate::error::CastRejection;
use crate::events::{SpellObserver, Subscription};
use crate::holder::{CastOutcome, SpellHolder};
use crate::pickups::{DropSite, PickupField, PickupId, PrefabKey};
use crate::presenter::SpellButton;
use crate::spells::{IconHandle, Spell, SpellCatalog, SpellDefinition};

/// An input-layer request, applied at the start of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Cast,
    Drop,
    Collect(PickupId),
}

/// What happened during one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// One entry per `Cast` command, in order.
    pub cast_results: SmallVec<[Result<CastOutcome, CastRejection>; 2]>,
    /// Pickups whose collection granted a spell.
    pub collected: SmallVec<[PickupId; 2]>,
    /// A `Drop` command released a spell.
    pub dropped: bool,
    /// The cooldown completed this frame.
    pub became_ready: bool,
    /// Game time that elapsed this frame.
    pub game_delta: f32,
}

/// One player's spell system.
#[derive(Debug)]
pub struct SpellRuntime {
    config: SpellConfig,
    catalog: Arc<SpellCatalog>,
    holder: SpellHolder,
    pickups: PickupField,
    effects: EffectHost,
    context: GameContext,
    clock: TimeScale,
    rng: GameRng,
}

impl SpellRuntime {
    /// Create a runtime with an empty holder.
    #[must_use]
    pub fn new(config: SpellConfig, catalog: Arc<SpellCatalog>, context: GameContext) -> Self {
        let prefab = config.pickup_prefab.as_deref().map(PrefabKey::new);

        Self {
            catalog,
            holder: SpellHolder::new(),
            pickups: PickupField::new(prefab),
            effects: EffectHost::new(),
            context,
            clock: TimeScale::new(config.time_scale),
            rng: GameRng::new(config.seed),
            config,
        }
    }

    // === Commands ===

    /// Cast the held spell. See [`SpellHolder::cast`].
    pub fn cast(&mut self) -> Result<CastOutcome, CastRejection> {
        self.holder.cast(&self.context, &mut self.effects)
    }

    /// Cast the held spell, reporting only whether it happened.
    pub fn request_cast(&mut self) -> bool {
        self.cast().is_ok()
    }

    /// Drop the held spell at the player's feet.
    pub fn request_drop(&mut self) -> bool {
        let mut site = DropSite::new(&mut self.pickups, self.context.player.position);
        self.holder.request_drop(&mut site)
    }

    /// Collect a pickup. See [`PickupField::collect`].
    pub fn collect_pickup(&mut self, id: PickupId) -> bool {
        self.pickups.collect(
            id,
            &mut self.holder,
            &self.catalog,
            &mut self.rng,
            self.context.player.position,
        )
    }

    /// Grant a spell directly, bypassing the pickup field.
    pub fn acquire(&mut self, spell: Arc<Spell>, explicit_uses: Option<u32>) {
        let mut site = DropSite::new(&mut self.pickups, self.context.player.position);
        self.holder.acquire(spell, explicit_uses, &mut site);
    }

    /// Place a random spell pickup in the world.
    pub fn spawn_random_pickup(&mut self, position: Position) -> Option<PickupId> {
        self.pickups.spawn_random(position)
    }

    // === Frame ===

    /// Apply `commands` in order, then advance by `real_delta` seconds.
    pub fn frame(&mut self, real_delta: f32, commands: &[Command]) -> FrameReport {
        let mut report = FrameReport::default();

        for command in commands {
            match *command {
                Command::Cast => report.cast_results.push(self.cast()),
                Command::Drop => report.dropped |= self.request_drop(),
                Command::Collect(id) => {
                    if self.collect_pickup(id) {
                        report.collected.push(id);
                    }
                }
            }
        }

        let (game_delta, became_ready) = self.advance(real_delta);
        report.game_delta = game_delta;
        report.became_ready = became_ready;
        report
    }

    /// Advance timers and effects by `real_delta` seconds of real time.
    ///
    /// Returns the elapsed game time and whether the cooldown completed.
    pub fn advance(&mut self, real_delta: f32) -> (f32, bool) {
        let game_delta = self.clock.scaled(real_delta);

        let became_ready = self.holder.advance(game_delta);
        self.effects.advance(game_delta, &mut self.context);

        let pruned = self.holder.prune_observers();
        if pruned > 0 {
            debug!(pruned, "dropped observers pruned");
        }

        (game_delta, became_ready)
    }

    // === Observers ===

    pub fn subscribe<O>(&mut self, observer: &Rc<RefCell<O>>) -> Subscription
    where
        O: SpellObserver + 'static,
    {
        self.holder.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.holder.unsubscribe(subscription)
    }

    /// Create a spell button with the configured timings and subscribe it.
    ///
    /// The button stays subscribed while the returned `Rc` lives. The host
    /// advances it with each frame's `game_delta` and the holder's view.
    pub fn attach_button(&mut self) -> Rc<RefCell<SpellButton>> {
        let button = Rc::new(RefCell::new(SpellButton::new(self.config.presenter)));
        let _ = self.holder.subscribe(&button);
        button
    }

    // === Queries ===

    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.holder.is_holding()
    }

    #[must_use]
    pub fn current_definition(&self) -> Option<&SpellDefinition> {
        self.holder.current_definition()
    }

    #[must_use]
    pub fn current_icon(&self) -> Option<IconHandle> {
        self.holder.current_icon()
    }

    #[must_use]
    pub fn remaining_uses(&self) -> u32 {
        self.holder.remaining_uses()
    }

    #[must_use]
    pub fn cooldown_progress(&self) -> f32 {
        self.holder.cooldown_progress()
    }

    #[must_use]
    pub fn holder(&self) -> &SpellHolder {
        &self.holder
    }

    #[must_use]
    pub fn catalog(&self) -> &SpellCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn pickups(&self) -> &PickupField {
        &self.pickups
    }

    #[must_use]
    pub fn effects(&self) -> &EffectHost {
        &self.effects
    }

    #[must_use]
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Mutable game context, for hosts syncing player state each frame.
    pub fn context_mut(&mut self) -> &mut GameContext {
        &mut self.context
    }

    #[must_use]
    pub fn clock(&self) -> &TimeScale {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut TimeScale {
        &mut self.clock
    }

    #[must_use]
    pub fn config(&self) -> &SpellConfig {
        &self.config
    }
}
