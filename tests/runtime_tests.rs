//! Runtime integration tests.
//!
//! End-to-end flows through `SpellRuntime`: pickups, frames, scaled time and
//! the spell button.

use std::sync::Arc;

use spell_slot::core::{GameContext, Health, Position, SpellConfig};
use spell_slot::effects::Regeneration;
use spell_slot::error::CastRejection;
use spell_slot::holder::CastOutcome;
use spell_slot::presenter::ButtonCue;
use spell_slot::runtime::{Command, SpellRuntime};
use spell_slot::spells::SpellCatalog;

const MANIFEST: &str = r#"{
    "spells": [
        { "name": "Regeneration", "cooldown_seconds": 1.0, "max_uses": 3, "icon": 1,
          "effect": "regeneration" },
        { "name": "Greater Regeneration", "cooldown_seconds": 2.0, "max_uses": 5, "icon": 2,
          "effect": "regeneration" }
    ]
}"#;

fn catalog() -> Arc<SpellCatalog> {
    let mut catalog = SpellCatalog::new();
    catalog.register_effect("regeneration", Regeneration::default());
    let report = catalog.load_manifest(MANIFEST).unwrap();
    assert!(report.is_clean());
    Arc::new(catalog)
}

fn hurt() -> GameContext {
    GameContext::default().with_health(Health::new(1, 20))
}

fn runtime() -> SpellRuntime {
    SpellRuntime::new(SpellConfig::default(), catalog(), hurt())
}

fn grant(runtime: &mut SpellRuntime, name: &str, uses: Option<u32>) {
    let spell = runtime.catalog().by_name(name).unwrap().clone();
    runtime.acquire(spell, uses);
}

/// Random pickup, cast, drop, pick the drop back up.
#[test]
fn test_pickup_cast_drop_cycle() {
    let mut runtime = runtime();
    let pickup = runtime.spawn_random_pickup(Position::new(5.0, 5.0)).unwrap();

    let report = runtime.frame(0.016, &[Command::Collect(pickup)]);
    assert_eq!(report.collected.as_slice(), &[pickup]);
    assert!(runtime.is_holding());
    assert!(runtime.pickups().is_empty());

    let max_uses = runtime.current_definition().unwrap().max_uses;
    assert!(runtime.request_cast());
    assert_eq!(runtime.remaining_uses(), max_uses - 1);

    runtime.context_mut().player.position = Position::new(-3.0, 2.0);
    let report = runtime.frame(0.016, &[Command::Drop]);
    assert!(report.dropped);
    assert!(!runtime.is_holding());

    let dropped = runtime.pickups().iter().next().unwrap();
    assert_eq!(dropped.position(), Position::new(-3.0, 2.0));
    assert_eq!(dropped.record().unwrap().remaining_uses(), max_uses - 1);
    let dropped_id = dropped.id();

    // The cooldown went with the drop; the spell comes back ready
    assert!(runtime.collect_pickup(dropped_id));
    assert_eq!(runtime.remaining_uses(), max_uses - 1);
    assert_eq!(runtime.cooldown_progress(), 1.0);

    // A second collect of the same pickup does nothing
    assert!(!runtime.collect_pickup(dropped_id));
    assert_eq!(runtime.remaining_uses(), max_uses - 1);
}

/// Commands run before the tick, in order.
#[test]
fn test_frame_order() {
    let mut runtime = runtime();
    grant(&mut runtime, "Regeneration", None);

    let report = runtime.frame(0.5, &[Command::Cast, Command::Cast]);
    assert_eq!(
        report.cast_results.as_slice(),
        &[
            Ok(CastOutcome::Continued { remaining_uses: 2 }),
            Err(CastRejection::OnCooldown { remaining: 1.0 }),
        ]
    );
    assert!(!report.became_ready);
    assert_eq!(report.game_delta, 0.5);

    // The cooldown completes at the end of this frame, after the cast
    // command was already refused
    let report = runtime.frame(0.5, &[Command::Cast]);
    assert_eq!(
        report.cast_results.as_slice(),
        &[Err(CastRejection::OnCooldown { remaining: 0.5 })]
    );
    assert!(report.became_ready);

    let report = runtime.frame(0.5, &[Command::Cast]);
    assert_eq!(
        report.cast_results.as_slice(),
        &[Ok(CastOutcome::Continued { remaining_uses: 1 })]
    );
}

#[test]
fn test_last_use_cast_then_tick() {
    let mut runtime = runtime();
    grant(&mut runtime, "Regeneration", Some(1));

    let report = runtime.frame(5.0, &[Command::Cast]);
    assert_eq!(report.cast_results.as_slice(), &[Ok(CastOutcome::Exhausted)]);
    assert!(!report.became_ready);
    assert!(!runtime.is_holding());
}

#[test]
fn test_pause_freezes_cooldown_and_effects() {
    let mut runtime = runtime();
    grant(&mut runtime, "Regeneration", None);
    runtime.frame(0.0, &[Command::Cast]);
    let health = runtime.context().player.health.current();

    runtime.clock_mut().pause();
    for _ in 0..10 {
        let report = runtime.frame(1.0, &[]);
        assert_eq!(report.game_delta, 0.0);
        assert!(!report.became_ready);
    }
    assert!(runtime.holder().is_on_cooldown());
    assert_eq!(runtime.context().player.health.current(), health);

    runtime.clock_mut().resume();
    assert!(runtime.frame(1.0, &[]).became_ready);
}

#[test]
fn test_slow_motion() {
    let config = SpellConfig::default().with_time_scale(0.5);
    let mut runtime = SpellRuntime::new(config, catalog(), hurt());
    grant(&mut runtime, "Regeneration", None);
    runtime.cast().unwrap();

    assert!(!runtime.frame(1.0, &[]).became_ready);
    assert_eq!(runtime.cooldown_progress(), 0.5);
    assert!(runtime.frame(1.0, &[]).became_ready);
}

#[test]
fn test_effects_advance_with_frames() {
    let mut runtime = runtime();
    grant(&mut runtime, "Regeneration", None);

    runtime.frame(0.1, &[Command::Cast]);
    assert_eq!(runtime.effects().active_count(), 1);
    assert_eq!(runtime.context().player.health.current(), 2);

    for _ in 0..100 {
        runtime.frame(0.1, &[]);
    }
    assert!(runtime.effects().is_idle());
    assert_eq!(runtime.context().player.health.current(), 5);
}

/// Without a pickup prefab dropped spells are lost.
#[test]
fn test_missing_prefab_loses_drops() {
    let config = SpellConfig::default().with_pickup_prefab(None);
    let mut runtime = SpellRuntime::new(config, catalog(), hurt());

    assert!(runtime.spawn_random_pickup(Position::default()).is_none());

    grant(&mut runtime, "Regeneration", None);
    assert!(runtime.request_drop());
    assert!(!runtime.is_holding());
    assert!(runtime.pickups().is_empty());
}

#[test]
fn test_replacement_drops_at_player() {
    let mut runtime = runtime();
    runtime.context_mut().player.position = Position::new(1.0, 1.0);
    grant(&mut runtime, "Regeneration", Some(2));
    grant(&mut runtime, "Greater Regeneration", None);

    assert_eq!(runtime.current_definition().unwrap().name, "Greater Regeneration");
    assert_eq!(runtime.pickups().len(), 1);

    let dropped = runtime.pickups().iter().next().unwrap();
    assert_eq!(dropped.position(), Position::new(1.0, 1.0));
    assert_eq!(dropped.record().unwrap().spell().name(), "Regeneration");
    assert_eq!(dropped.record().unwrap().remaining_uses(), 2);
}

#[test]
fn test_same_seed_same_rolls() {
    let roll = |seed: u64| {
        let config = SpellConfig::default().with_seed(seed);
        let mut runtime = SpellRuntime::new(config, catalog(), hurt());
        (0..8)
            .map(|_| {
                let id = runtime.spawn_random_pickup(Position::default()).unwrap();
                runtime.collect_pickup(id);
                runtime.current_definition().unwrap().name.clone()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(roll(7), roll(7));
}

#[test]
fn test_attached_button() {
    let mut runtime = runtime();
    let button = runtime.attach_button();
    assert_eq!(runtime.holder().observer_count(), 1);

    grant(&mut runtime, "Regeneration", None);
    assert_eq!(button.borrow_mut().drain_cues(), vec![ButtonCue::Activate]);
    assert_eq!(button.borrow().display().uses_text, "3");

    let report = runtime.frame(0.016, &[Command::Drop]);
    button.borrow_mut().advance(report.game_delta, &runtime.holder().view());
    assert!(button.borrow().is_removing());
    let report = runtime.frame(0.5, &[]);
    button.borrow_mut().advance(report.game_delta, &runtime.holder().view());
    assert!(!button.borrow().display().visible);

    drop(button);
    runtime.frame(0.016, &[]);
    assert_eq!(runtime.holder().observer_count(), 0);
}

#[test]
fn test_config_from_json() {
    let config = SpellConfig::from_json(r#"{ "seed": 3, "time_scale": 2.0 }"#).unwrap();
    let mut runtime = SpellRuntime::new(config, catalog(), hurt());
    assert_eq!(runtime.clock().scale(), 2.0);

    grant(&mut runtime, "Regeneration", None);
    runtime.cast().unwrap();
    assert!(runtime.frame(0.5, &[]).became_ready);
}
