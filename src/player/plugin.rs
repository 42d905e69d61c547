//! Player plugin - defeat handling.

use bevy::prelude::*;

use super::spawning::detect_player_defeat;
use crate::core::{GameState, TickSet};

/// Player plugin - the player is spawned by the world builder; this plugin
/// watches its health.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            detect_player_defeat
                .in_set(TickSet::Cleanup)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
