//! World plugin - arena loading and setup.

use bevy::prelude::*;

use crate::core::GameState;
use crate::enemies::{DespawnQueue, EnemyRegistry};
use crate::navigation::NavigationSettings;

use super::builder::{build_arena, ArenaEntity};
use super::data::{load_arena_definition, ArenaDefinition};

/// World plugin - handles arena loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_arena_definition)
            .add_systems(OnExit(GameState::Loading), setup_arena)
            .add_systems(OnEnter(GameState::GameOver), cleanup_arena);
    }
}

/// Set up the arena from data.
pub fn setup_arena(
    mut commands: Commands,
    arena: Option<Res<ArenaDefinition>>,
    enemy_registry: Res<EnemyRegistry>,
    nav_settings: Res<NavigationSettings>,
) {
    let Some(arena) = arena else {
        error!("No arena loaded, nothing to build");
        return;
    };

    info!("Building arena: {}", arena.name);
    commands.insert_resource(arena.nav_grid());
    commands.spawn((
        ArenaEntity,
        DirectionalLight {
            illuminance: 2000.0,
            ..default()
        },
        Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::new(1.0, 0.0, 1.0), Vec3::Y),
    ));
    build_arena(&mut commands, &arena, &enemy_registry, &nav_settings);
}

/// Clear the arena once the game is over, along with any pending removals.
pub fn cleanup_arena(
    mut commands: Commands,
    query: Query<Entity, With<ArenaEntity>>,
    mut despawn_queue: ResMut<DespawnQueue>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    despawn_queue.clear();
}
