//! Player spawning and defeat detection.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use crate::combat::Weapon;
use crate::core::GameState;

/// Camera height above the player's origin.
pub const EYE_HEIGHT: f32 = 0.6;

/// Spawn the player entity with its camera and weapon.
pub fn spawn_player(
    commands: &mut Commands,
    transform: Transform,
    max_health: f32,
    weapon: Weapon,
) -> Entity {
    let player = commands
        .spawn((
            Player,
            Name::new("Player"),
            PlayerHealth::new(max_health),
            weapon,
            transform,
            Visibility::default(),
            // Rapier physics components
            RigidBody::KinematicPositionBased,
            Collider::capsule_y(0.5, 0.3),
        ))
        .id();

    // Spawn camera as child of player
    commands.entity(player).with_children(|parent| {
        parent.spawn((
            Camera3d::default(),
            PlayerCamera,
            Transform::from_xyz(0.0, EYE_HEIGHT, 0.0),
        ));
    });

    info!(
        "Spawned player at {} with {} health",
        transform.translation, max_health
    );
    player
}

/// Enter Game Over once the player's health runs out.
pub fn detect_player_defeat(
    query: Query<&PlayerHealth, (With<Player>, Changed<PlayerHealth>)>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for health in query.iter() {
        if health.is_depleted() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        }
    }
}
