//! Damage emitters driven through the ECS: projectiles, particles, hitbox
//! binding and weapon hit routing.

mod common;

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
use common::*;
use grimhold::combat::emitters::{
    bind_hitbox_owners, particle_impacts, projectile_collisions, route_weapon_hits,
};
use grimhold::combat::{
    CombatSettings, Destructible, Hazard, Health, Hitbox, ObjectTag, ParticleImpact, Projectile,
    Weapon, WeaponHit,
};
use grimhold::core::{DamageEvent, FeedbackEvent, ScoreEvent};
use grimhold::enemies::lifecycle::apply_enemy_damage;

fn player_bullet(app: &mut App, damage: f32) -> Entity {
    app.world_mut()
        .spawn((
            Projectile { damage },
            ObjectTag("PlayerBullet".to_string()),
            Transform::default(),
        ))
        .id()
}

fn touch(app: &mut App, a: Entity, b: Entity) {
    app.world_mut()
        .send_event(CollisionEvent::Started(a, b, CollisionEventFlags::empty()));
}

fn enemy_health(app: &App, enemy: Entity) -> f32 {
    app.world().get::<Health>(enemy).unwrap().current
}

fn projectile_app() -> App {
    let mut app = combat_app(0.0);
    app.add_event::<CollisionEvent>()
        .add_systems(Update, (projectile_collisions, apply_enemy_damage).chain());
    app
}

#[test]
fn spent_projectile_still_deals_its_own_damage() {
    let mut app = projectile_app();
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let bullet = player_bullet(&mut app, 15.0);

    touch(&mut app, enemy, bullet);
    app.update();

    assert_eq!(enemy_health(&app, enemy), 85.0);
    assert!(!app.world().entities().contains(bullet));
}

#[test]
fn projectile_hits_once_across_several_colliders() {
    let mut app = projectile_app();
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let hitbox = spawn_hitbox(&mut app, enemy);
    let bullet = player_bullet(&mut app, 15.0);

    touch(&mut app, bullet, hitbox);
    touch(&mut app, enemy, bullet);
    app.update();

    assert_eq!(sent::<DamageEvent>(&app).len(), 1);
    assert_eq!(enemy_health(&app, enemy), 85.0);
}

#[test]
fn projectile_survives_when_configured_to() {
    let mut app = projectile_app();
    app.world_mut()
        .resource_mut::<CombatSettings>()
        .destroy_projectile_on_hit = false;
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let bullet = player_bullet(&mut app, 15.0);

    touch(&mut app, enemy, bullet);
    app.update();

    assert_eq!(enemy_health(&app, enemy), 85.0);
    assert!(app.world().entities().contains(bullet));
}

#[test]
fn stray_objects_are_not_projectiles() {
    let mut app = projectile_app();
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let rock = app
        .world_mut()
        .spawn((Projectile { damage: 50.0 }, Name::new("Rock")))
        .id();

    touch(&mut app, enemy, rock);
    app.update();

    assert!(sent::<DamageEvent>(&app).is_empty());
    assert_eq!(enemy_health(&app, enemy), 100.0);
    assert!(app.world().entities().contains(rock));
}

#[test]
fn particle_impacts_damage_through_hitboxes_and_keep_the_emitter() {
    let mut app = combat_app(0.0);
    app.add_event::<ParticleImpact>()
        .add_systems(Update, (particle_impacts, apply_enemy_damage).chain());
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let hitbox = spawn_hitbox(&mut app, enemy);
    let spray = app
        .world_mut()
        .spawn((Hazard { damage_per_hit: 7.0 }, Name::new("Bullet Spray")))
        .id();
    let smoke = app
        .world_mut()
        .spawn((Hazard { damage_per_hit: 7.0 }, Name::new("Smoke")))
        .id();

    app.world_mut().send_event(ParticleImpact {
        particle: spray,
        target: hitbox,
    });
    app.world_mut().send_event(ParticleImpact {
        particle: smoke,
        target: enemy,
    });
    app.update();

    assert_eq!(enemy_health(&app, enemy), 93.0);
    assert!(app.world().entities().contains(spray));
}

#[test]
fn hitboxes_bind_to_the_nearest_enemy_ancestor() {
    let mut app = combat_app(0.0);
    app.add_systems(Update, bind_hitbox_owners);
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let limb = app.world_mut().spawn(Transform::default()).id();
    app.world_mut().entity_mut(enemy).add_child(limb);
    let head = app.world_mut().spawn(Hitbox::default()).id();
    app.world_mut().entity_mut(limb).add_child(head);
    let loose = app.world_mut().spawn(Hitbox::default()).id();

    app.update();

    assert_eq!(app.world().get::<Hitbox>(head).unwrap().owner, Some(enemy));
    assert_eq!(app.world().get::<Hitbox>(loose).unwrap().owner, None);
}

fn weapon_app() -> (App, Entity) {
    let mut app = combat_app(0.0);
    app.add_event::<WeaponHit>()
        .add_systems(Update, route_weapon_hits);
    let shooter = app.world_mut().spawn(Weapon::default()).id();
    (app, shooter)
}

fn shoot(app: &mut App, shooter: Entity, struck: Entity) {
    app.world_mut().send_event(WeaponHit {
        shooter,
        struck,
        point: Vec3::new(0.0, 1.0, -3.0),
        normal: Vec3::Z,
        direction: Vec3::NEG_Z,
    });
}

#[test]
fn weapon_hits_route_by_priority() {
    let (mut app, shooter) = weapon_app();
    let enemy = spawn_enemy(&mut app, zombie_config(), 100.0, Vec3::ZERO);
    let head = spawn_hitbox(&mut app, enemy);
    let arm = app.world_mut().spawn(Transform::default()).id();
    app.world_mut().entity_mut(enemy).add_child(arm);
    // Breakable but with health: health wins
    let crate_entity = app
        .world_mut()
        .spawn((Health::new(30.0), Destructible { points: 5 }))
        .id();

    shoot(&mut app, shooter, head);
    shoot(&mut app, shooter, arm);
    shoot(&mut app, shooter, crate_entity);
    app.update();

    assert_eq!(
        sent::<DamageEvent>(&app),
        vec![
            DamageEvent::declared(enemy, shooter, 10.0),
            DamageEvent::declared(enemy, shooter, 10.0),
            DamageEvent::declared(crate_entity, shooter, 10.0),
        ]
    );
    assert!(sent::<ScoreEvent>(&app).is_empty());
    assert!(app.world().entities().contains(crate_entity));
}

#[test]
fn shooting_a_prop_scores_and_removes_it() {
    let (mut app, shooter) = weapon_app();
    let barrel = app.world_mut().spawn(Destructible { points: 3 }).id();
    let wall = app.world_mut().spawn(Transform::default()).id();

    shoot(&mut app, shooter, barrel);
    shoot(&mut app, shooter, wall);
    app.update();

    let scores = sent::<ScoreEvent>(&app);
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].points, 3);
    assert!(!app.world().entities().contains(barrel));
    assert!(sent::<DamageEvent>(&app).is_empty());

    let feedback = sent::<FeedbackEvent>(&app);
    let impacts = feedback
        .iter()
        .filter(|event| matches!(event, FeedbackEvent::Impact { .. }))
        .count();
    assert_eq!(impacts, 2);
    assert!(feedback
        .iter()
        .any(|event| matches!(event, FeedbackEvent::PropDestroyed { .. })));
}
