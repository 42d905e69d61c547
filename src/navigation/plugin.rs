//! Navigation plugin - placement guard and agent movement.

use bevy::prelude::*;

use super::guard::NavigationSettings;
use super::surface::NavGrid;
use super::systems;
use crate::core::TickSet;

/// Navigation plugin - keeps agents on the walkable surface.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavigationSettings>()
            .init_resource::<NavGrid>()
            .add_systems(Startup, systems::load_navigation_settings)
            .add_systems(
                Update,
                (systems::place_new_agents, systems::retry_agent_placement)
                    .chain()
                    .in_set(TickSet::Placement),
            )
            .add_systems(Update, systems::drive_nav_agents.in_set(TickSet::Move));
    }
}
