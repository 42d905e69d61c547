//! Arena construction from data definitions.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::data::{ArenaDefinition, Cell, SpawnKind};
use crate::combat::{Destructible, Health};
use crate::enemies::{spawn_enemy, EnemyRegistry};
use crate::navigation::NavigationSettings;
use crate::player::spawn_player;

/// Marker for everything the arena builder spawned.
#[derive(Component)]
pub struct ArenaEntity;

const FLOOR_THICKNESS: f32 = 0.2;

/// Build the arena: static colliders, props, enemies and the player.
pub fn build_arena(
    commands: &mut Commands,
    arena: &ArenaDefinition,
    enemy_registry: &EnemyRegistry,
    nav_settings: &NavigationSettings,
) -> Entity {
    let half_tile = arena.tile_size / 2.0;
    let mut floors = 0;
    let mut walls = 0;

    for z in 0..arena.height as i32 {
        for x in 0..arena.width as i32 {
            let center = arena.grid_to_world(x, z);
            match arena.cell(x, z) {
                Cell::Floor => {
                    commands.spawn((
                        ArenaEntity,
                        Transform::from_translation(center - Vec3::Y * FLOOR_THICKNESS / 2.0),
                        RigidBody::Fixed,
                        Collider::cuboid(half_tile, FLOOR_THICKNESS / 2.0, half_tile),
                    ));
                    floors += 1;
                }
                Cell::Wall => {
                    commands.spawn((
                        ArenaEntity,
                        Transform::from_translation(center + Vec3::Y * arena.wall_height / 2.0),
                        RigidBody::Fixed,
                        Collider::cuboid(half_tile, arena.wall_height / 2.0, half_tile),
                    ));
                    walls += 1;
                }
                Cell::Void => {}
            }
        }
    }

    for spawn in &arena.spawns {
        let position = arena.grid_to_world(spawn.grid_pos.0, spawn.grid_pos.1);
        let entity = match spawn.kind {
            SpawnKind::Enemy(variant) => {
                spawn_enemy(commands, enemy_registry, nav_settings, variant, position)
            }
            SpawnKind::Barrel => commands
                .spawn((
                    Name::new("Barrel"),
                    Destructible {
                        points: arena.prop_points,
                    },
                    Transform::from_translation(position + Vec3::Y * 0.5),
                    RigidBody::Fixed,
                    Collider::cylinder(0.5, 0.4),
                ))
                .id(),
            SpawnKind::Crate => commands
                .spawn((
                    Name::new("Crate"),
                    Health::new(arena.crate_health),
                    Transform::from_translation(position + Vec3::Y * 0.5),
                    RigidBody::Dynamic,
                    Collider::cuboid(0.5, 0.5, 0.5),
                ))
                .id(),
        };
        commands.entity(entity).insert(ArenaEntity);
    }

    let player = spawn_player(
        commands,
        arena.player_transform(),
        arena.player_health,
        arena.weapon.clone(),
    );
    commands.entity(player).insert(ArenaEntity);

    info!(
        "Built arena '{}': {} floor tiles, {} walls, {} spawns",
        arena.name,
        floors,
        walls,
        arena.spawns.len()
    );
    player
}
