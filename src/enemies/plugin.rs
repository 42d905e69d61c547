//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::components::{EnemyCue, StrikeEvent};
use super::config::CueRng;
use super::data::{load_enemy_definitions, EnemyRegistry};
use super::lifecycle::{self, DespawnQueue};
use crate::core::TickSet;

/// Enemy plugin - handles enemy damage, AI, death and removal.
///
/// Spawning is done by the world builder from arena data.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .init_resource::<DespawnQueue>()
            .init_resource::<CueRng>()
            .add_event::<EnemyCue>()
            .add_event::<StrikeEvent>()
            .add_systems(Startup, load_enemy_definitions)
            .add_systems(Update, lifecycle::apply_enemy_damage.in_set(TickSet::Resolve))
            .add_systems(
                Update,
                (
                    ai::acquire_targets,
                    ai::tick_enemy_brains,
                    ai::apply_enemy_strikes,
                )
                    .chain()
                    .in_set(TickSet::Decide),
            )
            .add_systems(
                Update,
                lifecycle::process_despawn_queue.in_set(TickSet::Cleanup),
            );
    }
}
