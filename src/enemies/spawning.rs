//! Enemy spawning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::brain::CombatBrain;
use super::components::{Enemy, EnemySounds, LocomotionCue};
use super::data::{EnemyRegistry, EnemyVariant};
use super::target::TargetBinding;
use crate::combat::{Health, Hitbox};
use crate::navigation::{NavAgent, NavigationSettings, NeedsPlacement, PlacementGuard};

/// Spawn one enemy of `variant` at `position`.
///
/// The enemy starts with movement disabled; the navigation placement systems
/// enable it once it stands on the surface. A hitbox child forwards hits to
/// the enemy and is bound to it at startup.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &EnemyRegistry,
    nav_settings: &NavigationSettings,
    variant: EnemyVariant,
    position: Vec3,
) -> Entity {
    let definition = registry.get(variant);
    let config = definition.to_config();
    let collider = &definition.collider;
    // The enemy's origin sits on the floor; the body stands on top of it
    let body_centre = collider.standing_height() / 2.0;

    let enemy = commands
        .spawn((
            (
                Enemy { variant },
                Name::new(definition.name.clone()),
                Health::new(definition.max_health),
                CombatBrain::default(),
                TargetBinding::default(),
                LocomotionCue::default(),
                EnemySounds {
                    attack: definition.sounds.attack.clone(),
                    death: definition.sounds.death.clone(),
                },
            ),
            // Navigation
            (
                NavAgent::new(definition.move_speed, config.stopping_distance()),
                PlacementGuard::from_settings(nav_settings),
                NeedsPlacement,
            ),
            config,
            Transform::from_translation(position),
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::compound(vec![(
                Vec3::Y * body_centre,
                Quat::IDENTITY,
                Collider::capsule_y(collider.half_height, collider.radius),
            )]),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id();

    // Head hitbox, inside the top of the body capsule
    commands.entity(enemy).with_children(|parent| {
        parent.spawn((
            Hitbox::default(),
            Name::new("Hitbox"),
            Transform::from_xyz(0.0, collider.standing_height() - collider.radius, 0.0),
            Collider::ball(collider.radius * 0.8),
            Sensor,
            ActiveEvents::COLLISION_EVENTS,
        ));
    });

    info!("Spawned {} at {}", definition.name, position);
    enemy
}
