//! Enemy damage, death and delayed removal, driven through the ECS.

mod common;

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy_rapier3d::prelude::ColliderDisabled;
use common::*;
use grimhold::combat::{Dead, Health};
use grimhold::core::{DamageEvent, DeathEvent, FeedbackEvent};
use grimhold::enemies::lifecycle::{apply_enemy_damage, process_despawn_queue};
use grimhold::enemies::{CombatBrain, CombatState, Cue, DespawnQueue, EnemyCue};
use grimhold::navigation::NavAgent;
use grimhold::world::{cleanup_arena, ArenaEntity};

fn lifecycle_app(now: f32) -> App {
    let mut app = combat_app(now);
    app.add_systems(Update, (apply_enemy_damage, process_despawn_queue).chain());
    app
}

fn hit(app: &mut App, target: Entity, amount: f32) {
    let source = Entity::PLACEHOLDER;
    app.world_mut()
        .send_event(DamageEvent::declared(target, source, amount));
}

fn cues_of(app: &App, kind: fn(&Cue) -> bool) -> usize {
    sent::<EnemyCue>(app)
        .iter()
        .filter(|event| kind(&event.cue))
        .count()
}

#[test]
fn wounds_then_kills_exactly_once() {
    let mut app = lifecycle_app(10.0);
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let hitbox = spawn_hitbox(&mut app, enemy);

    hit(&mut app, enemy, 30.0);
    update_at(&mut app, 10.0);
    assert_eq!(app.world().get::<Health>(enemy).unwrap().current, 70.0);
    assert_eq!(cues_of(&app, |cue| *cue == Cue::TakeDamage), 1);
    assert!(sent::<DeathEvent>(&app).is_empty());

    hit(&mut app, enemy, 30.0);
    hit(&mut app, enemy, 50.0);
    update_at(&mut app, 10.5);

    let health = app.world().get::<Health>(enemy).unwrap();
    assert_eq!(health.current, 0.0);
    assert!(health.is_dead());
    assert_eq!(cues_of(&app, |cue| *cue == Cue::TakeDamage), 2);
    assert_eq!(cues_of(&app, |cue| *cue == Cue::Die), 1);

    let deaths = sent::<DeathEvent>(&app);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].entity, enemy);
    assert!(sent::<FeedbackEvent>(&app).contains(&FeedbackEvent::DeathSound { source: enemy }));

    let world = app.world();
    assert_eq!(
        world.get::<CombatBrain>(enemy).unwrap().state(),
        CombatState::Dead
    );
    assert!(world.get::<Dead>(enemy).is_some());
    assert!(world.get::<ColliderDisabled>(enemy).is_some());
    assert!(world.get::<ColliderDisabled>(hitbox).is_some());

    let agent = world.get::<NavAgent>(enemy).unwrap();
    assert!(agent.is_stopped());
    assert!(!agent.is_enabled());
}

#[test]
fn damage_after_death_is_ignored() {
    let mut app = lifecycle_app(0.0);
    let enemy = spawn_enemy(&mut app, zombie_config(), 20.0, Vec3::ZERO);

    hit(&mut app, enemy, 25.0);
    update_at(&mut app, 0.0);
    assert_eq!(sent::<DeathEvent>(&app).len(), 1);

    hit(&mut app, enemy, 25.0);
    update_at(&mut app, 1.0);
    assert!(sent::<DeathEvent>(&app).is_empty());
    assert!(sent::<EnemyCue>(&app).is_empty());
    assert_eq!(app.world().resource::<DespawnQueue>().len(), 1);
}

#[test]
fn corpse_is_removed_after_the_delay() {
    let mut app = lifecycle_app(3.0);
    let enemy = spawn_enemy(&mut app, zombie_config(), 10.0, Vec3::ZERO);
    let hitbox = spawn_hitbox(&mut app, enemy);

    hit(&mut app, enemy, 10.0);
    update_at(&mut app, 3.0);
    assert!(app.world().entities().contains(enemy));

    // Default removal delay is five seconds
    update_at(&mut app, 7.9);
    assert!(app.world().entities().contains(enemy));

    update_at(&mut app, 8.0);
    assert!(!app.world().entities().contains(enemy));
    assert!(!app.world().entities().contains(hitbox));
    assert!(app.world().resource::<DespawnQueue>().is_empty());
}

#[test]
fn arena_teardown_drops_pending_removals() {
    let mut app = lifecycle_app(0.0);
    let enemy = spawn_enemy(&mut app, zombie_config(), 10.0, Vec3::ZERO);
    app.world_mut().entity_mut(enemy).insert(ArenaEntity);

    hit(&mut app, enemy, 10.0);
    update_at(&mut app, 0.0);
    assert_eq!(app.world().resource::<DespawnQueue>().len(), 1);

    app.world_mut().run_system_once(cleanup_arena).unwrap();
    assert!(!app.world().entities().contains(enemy));
    assert!(app.world().resource::<DespawnQueue>().is_empty());
}
