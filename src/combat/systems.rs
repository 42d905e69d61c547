//! Damage application for everything that is not an enemy.
//!
//! Enemies own their own damage handling (cues, death lifecycle). Anything
//! else carrying [`Health`], such as breakable crates, is handled here.

use bevy::prelude::*;

use super::components::*;
use super::damage::{DamageOrigin, DamageSources};
use super::settings::CombatSettings;
use crate::core::EnemyFault;
use crate::enemies::Enemy;

/// Resolve and apply damage to non-enemy health, removing what dies.
pub fn apply_generic_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    settings: Res<CombatSettings>,
    sources: DamageSources,
    mut health_query: Query<&mut Health, (Without<Enemy>, Without<Dead>)>,
    mut death_events: EventWriter<DeathEvent>,
) {
    let resolver = settings.resolver();

    for event in damage_events.read() {
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };

        let resolved = resolver.resolve(event, &sources);
        if resolved.origin == DamageOrigin::Default {
            warn!(
                "{}",
                EnemyFault::UnresolvedDamageSource {
                    origin: event.source,
                    fallback: resolved.amount,
                }
            );
        }

        if let HealthChange::Killed { .. } = health.apply_damage(resolved.amount) {
            debug!("{:?} destroyed by {:?}", event.target, event.source);
            commands.entity(event.target).despawn_recursive();
            death_events.send(DeathEvent {
                entity: event.target,
                killed_by: Some(event.source),
            });
        }
    }
}
