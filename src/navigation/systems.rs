//! Navigation systems: spawn placement, attach retries and agent movement.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::path::Path;

use super::agent::{face_towards, NavAgent};
use super::guard::{snap_to_surface, NavigationSettings, PlacementGuard, PlacementStep};
use super::surface::{NavGrid, NoGround, RapierGroundProbe};
use crate::combat::Dead;
use crate::core::{load_or_default, EnemyFault, SimulationContext};

/// Marker for agents that have not had their spawn-time snap yet.
#[derive(Component)]
pub struct NeedsPlacement;

/// Load navigation tuning from assets/data/navigation.ron.
pub fn load_navigation_settings(mut commands: Commands) {
    let settings: NavigationSettings = load_or_default(Path::new("assets/data/navigation.ron"));
    commands.insert_resource(settings);
}

/// Snap freshly spawned agents onto the surface and make the first attach attempt.
pub fn place_new_agents(
    mut commands: Commands,
    rapier_context: Query<&RapierContext>,
    grid: Res<NavGrid>,
    settings: Res<NavigationSettings>,
    mut query: Query<
        (Entity, &mut Transform, &mut PlacementGuard, &mut NavAgent),
        With<NeedsPlacement>,
    >,
) {
    let context = rapier_context.get_single().ok();

    for (entity, mut transform, mut guard, mut agent) in query.iter_mut() {
        let spawn = transform.translation;
        let snapped = match context {
            Some(context) => {
                snap_to_surface(grid.as_ref(), &RapierGroundProbe { context }, spawn, &settings)
            }
            None => snap_to_surface(grid.as_ref(), &NoGround, spawn, &settings),
        };
        transform.translation = snapped;

        match guard.attempt(grid.as_ref(), snapped) {
            PlacementStep::Attached(point) => {
                transform.translation = point;
                agent.enable();
                debug!("Agent {:?} attached to navigation surface at {}", entity, point);
            }
            PlacementStep::Waiting | PlacementStep::Settled => {
                warn!(
                    "{}",
                    EnemyFault::NavigationUnavailable {
                        enemy: entity,
                        radius: guard.attach_radius(),
                    }
                );
            }
        }

        commands.entity(entity).remove::<NeedsPlacement>();
    }
}

/// Retry attachment for agents still waiting on the surface.
///
/// Runs while paused as well; dead agents stop retrying.
pub fn retry_agent_placement(
    context: Res<SimulationContext>,
    grid: Res<NavGrid>,
    mut query: Query<
        (Entity, &mut Transform, &mut PlacementGuard, &mut NavAgent),
        (Without<NeedsPlacement>, Without<Dead>),
    >,
) {
    for (entity, mut transform, mut guard, mut agent) in query.iter_mut() {
        if let PlacementStep::Attached(point) =
            guard.tick(context.delta, grid.as_ref(), transform.translation)
        {
            transform.translation = point;
            agent.enable();
            info!(
                "Agent {:?} attached to navigation surface after {} attempts",
                entity,
                guard.attempts()
            );
        }
    }
}

/// Move enabled agents toward their destinations.
pub fn drive_nav_agents(
    context: Res<SimulationContext>,
    grid: Res<NavGrid>,
    mut query: Query<(&mut Transform, &mut NavAgent), Without<Dead>>,
) {
    if !context.active {
        return;
    }

    for (mut transform, mut agent) in query.iter_mut() {
        let next = agent.step(transform.translation, context.delta, grid.as_ref());
        if next == transform.translation {
            continue;
        }

        transform.translation = next;
        if let Some(destination) = agent.destination() {
            face_towards(&mut transform, destination);
        }
    }
}
