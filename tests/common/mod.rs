//! Shared fixtures for headless integration tests.
//!
//! These apps run on `MinimalPlugins` and register only the events, resources
//! and systems a scenario needs. Physics is never stepped; the simulation
//! clock is set by hand between updates.

#![allow(dead_code)]

use bevy::prelude::*;
use grimhold::combat::{CombatSettings, Health, Hitbox};
use grimhold::core::{DamageEvent, DeathEvent, FeedbackEvent, ScoreEvent, SimulationContext};
use grimhold::enemies::{
    CombatBrain, CueRng, DespawnQueue, Enemy, EnemyConfig, EnemyCue, EnemyVariant, LocomotionCue,
    StrikeEvent, TargetBinding,
};
use grimhold::navigation::NavAgent;
use grimhold::player::{Player, PlayerHealth};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Events of type `E` read during the most recent frame.
#[derive(Resource)]
pub struct Recorded<E: Event>(pub Vec<E>);

fn forget_recorded<E: Event>(mut recorded: ResMut<Recorded<E>>) {
    recorded.0.clear();
}

fn record<E: Event + Clone>(mut events: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(events.read().cloned());
}

/// Keep a per-frame copy of every `E` sent, for [`sent`].
pub fn record_events<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<E>(Vec::new()))
        .add_systems(First, forget_recorded::<E>)
        .add_systems(Last, record::<E>);
}

/// A headless app with every combat event and resource registered.
pub fn combat_app(now: f32) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(SimulationContext::running_at(now))
        .init_resource::<CombatSettings>()
        .init_resource::<DespawnQueue>()
        .insert_resource(CueRng(StdRng::seed_from_u64(7)))
        .add_event::<DamageEvent>()
        .add_event::<DeathEvent>()
        .add_event::<FeedbackEvent>()
        .add_event::<EnemyCue>()
        .add_event::<StrikeEvent>()
        .add_event::<ScoreEvent>();
    record_events::<DamageEvent>(&mut app);
    record_events::<DeathEvent>(&mut app);
    record_events::<FeedbackEvent>(&mut app);
    record_events::<EnemyCue>(&mut app);
    record_events::<StrikeEvent>(&mut app);
    record_events::<ScoreEvent>(&mut app);
    app
}

/// Move the simulation clock to `now` and run one frame.
pub fn update_at(app: &mut App, now: f32) {
    app.world_mut().resource_mut::<SimulationContext>().now = now;
    app.update();
}

/// Events of type `E` sent during the most recent update.
pub fn sent<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

pub fn zombie_config() -> EnemyConfig {
    EnemyVariant::Zombie.preset().to_config()
}

/// Spawn an enemy with the components the combat systems expect.
pub fn spawn_enemy(app: &mut App, config: EnemyConfig, health: f32, position: Vec3) -> Entity {
    // Already placed on the surface
    let mut agent = NavAgent::new(3.5, config.stopping_distance());
    agent.enable();
    app.world_mut()
        .spawn((
            Enemy {
                variant: EnemyVariant::Zombie,
            },
            Health::new(health),
            CombatBrain::default(),
            TargetBinding::default(),
            LocomotionCue::default(),
            agent,
            config,
            Transform::from_translation(position),
        ))
        .id()
}

/// Spawn a hitbox child already bound to `owner`.
pub fn spawn_hitbox(app: &mut App, owner: Entity) -> Entity {
    let hitbox = app
        .world_mut()
        .spawn((Hitbox::owned_by(owner), Transform::default()))
        .id();
    app.world_mut().entity_mut(owner).add_child(hitbox);
    hitbox
}

pub fn spawn_player(app: &mut App, position: Vec3, health: f32) -> Entity {
    app.world_mut()
        .spawn((
            Player,
            PlayerHealth::new(health),
            Transform::from_translation(position),
        ))
        .id()
}
