//! Enemy health, death, and delayed removal.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::brain::CombatBrain;
use super::components::{Cue, Enemy, EnemyCue};
use crate::combat::{
    CombatSettings, DamageOrigin, DamageSources, Dead, Health, HealthChange, Hitbox,
};
use crate::core::{DamageEvent, DeathEvent, EnemyFault, FeedbackEvent, SimulationContext};
use crate::navigation::NavAgent;

/// Entities waiting to be removed, each with the time it is due.
///
/// Driven by [`SimulationContext::now`], so removal waits out a pause.
#[derive(Resource, Debug, Default)]
pub struct DespawnQueue {
    pending: Vec<(Entity, f32)>,
}

impl DespawnQueue {
    /// Schedule removal. Re-scheduling an entity keeps the earlier time.
    pub fn schedule(&mut self, entity: Entity, at: f32) {
        if self.contains(entity) {
            return;
        }
        self.pending.push((entity, at));
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.pending.iter().any(|(pending, _)| *pending == entity)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Forget everything pending, for when the whole arena goes at once.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every entity due at `now`.
    pub fn drain_due(&mut self, now: f32) -> Vec<Entity> {
        let mut due = Vec::new();
        self.pending.retain(|&(entity, at)| {
            if now >= at {
                due.push(entity);
                false
            } else {
                true
            }
        });
        due
    }
}

/// Resolve incoming damage for enemies and run the death transition.
#[allow(clippy::too_many_arguments)]
pub fn apply_enemy_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    settings: Res<CombatSettings>,
    context: Res<SimulationContext>,
    sources: DamageSources,
    mut enemies: Query<(&mut Health, &mut CombatBrain, &mut NavAgent), With<Enemy>>,
    hitboxes: Query<(Entity, &Hitbox)>,
    mut queue: ResMut<DespawnQueue>,
    mut cues: EventWriter<EnemyCue>,
    mut feedback: EventWriter<FeedbackEvent>,
    mut death_events: EventWriter<DeathEvent>,
) {
    let resolver = settings.resolver();

    for event in damage_events.read() {
        let Ok((mut health, mut brain, mut agent)) = enemies.get_mut(event.target) else {
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

        match health.apply_damage(resolved.amount) {
            HealthChange::Ignored => {}
            HealthChange::Wounded { dealt, remaining } => {
                debug!("Enemy {:?} took {} damage, {} left", event.target, dealt, remaining);
                cues.send(EnemyCue::new(event.target, Cue::TakeDamage));
            }
            HealthChange::Killed { dealt } => {
                debug!("Enemy {:?} took {} damage and died", event.target, dealt);
                cues.send(EnemyCue::new(event.target, Cue::TakeDamage));

                if !brain.kill() {
                    continue;
                }
                agent.stop(true);
                agent.disable();

                commands.entity(event.target).insert((Dead, ColliderDisabled));
                for (hitbox_entity, hitbox) in hitboxes.iter() {
                    if hitbox.owner == Some(event.target) {
                        commands.entity(hitbox_entity).insert(ColliderDisabled);
                    }
                }

                cues.send(EnemyCue::new(event.target, Cue::Die));
                feedback.send(FeedbackEvent::DeathSound {
                    source: event.target,
                });
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: Some(event.source),
                });
                queue.schedule(event.target, context.now + settings.removal_delay);
                info!("Enemy {:?} died", event.target);
            }
        }
    }
}

/// Remove dead enemies whose delay has run out.
pub fn process_despawn_queue(
    mut commands: Commands,
    context: Res<SimulationContext>,
    mut queue: ResMut<DespawnQueue>,
) {
    for entity in queue.drain_due(context.now) {
        if let Some(entity_commands) = commands.get_entity(entity) {
            entity_commands.despawn_recursive();
        }
    }
}
