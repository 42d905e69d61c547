//! Enemy AI behavior systems.

use bevy::prelude::*;

use super::brain::{AttackResolution, CombatBrain, Movement, TargetSnapshot, TickInput};
use super::components::{Cue, Enemy, EnemyCue, LocomotionCue, StrikeEvent};
use super::config::{CueRng, EnemyConfig};
use super::target::{acquire, PlayerScene, TargetBinding};
use crate::combat::{Dead, HealthCapability};
use crate::core::{EnemyFault, FeedbackEvent, SimulationContext};
use crate::navigation::{face_towards, NavAgent};
use crate::player::{Player, PlayerHealth};

/// Look up the target once for every enemy that has not tried yet.
pub fn acquire_targets(
    scene: PlayerScene,
    mut enemies: Query<(Entity, &mut TargetBinding), With<Enemy>>,
) {
    let mut pending = enemies
        .iter_mut()
        .filter(|(_, binding)| **binding == TargetBinding::Pending)
        .peekable();
    if pending.peek().is_none() {
        return;
    }

    let result = acquire(&scene);
    for (entity, mut binding) in pending {
        *binding = match &result {
            Ok(target) => {
                debug!("Enemy {:?} tracking player {:?}", entity, target.player);
                TargetBinding::Bound(*target)
            }
            Err(reason) => {
                warn!(
                    "{}",
                    EnemyFault::MissingTarget {
                        enemy: entity,
                        reason: reason.to_string(),
                    }
                );
                TargetBinding::Unavailable
            }
        };
    }
}

/// Run every live enemy's combat state machine for this tick.
#[allow(clippy::too_many_arguments)]
pub fn tick_enemy_brains(
    context: Res<SimulationContext>,
    mut rng: ResMut<CueRng>,
    mut enemies: Query<
        (
            Entity,
            &mut Transform,
            &EnemyConfig,
            &mut CombatBrain,
            &TargetBinding,
            &mut NavAgent,
            &mut LocomotionCue,
        ),
        (With<Enemy>, Without<Dead>, Without<Player>),
    >,
    players: Query<&Transform, (With<Player>, Without<Enemy>)>,
    healths: Query<&PlayerHealth>,
    mut cues: EventWriter<EnemyCue>,
    mut strikes: EventWriter<StrikeEvent>,
    mut feedback: EventWriter<FeedbackEvent>,
) {
    if !context.active {
        return;
    }

    for (entity, mut transform, config, mut brain, binding, mut agent, mut locomotion) in
        enemies.iter_mut()
    {
        let bound = match binding {
            TargetBinding::Bound(target) => Some(*target),
            TargetBinding::Pending | TargetBinding::Unavailable => None,
        };
        let snapshot = bound.and_then(|target| {
            let position = players.get(target.player).ok()?.translation;
            let health = healths.get(target.health).ok()?.current_health();
            Some(TargetSnapshot { position, health })
        });

        let outcome = brain.tick(
            config,
            TickInput {
                now: context.now,
                position: transform.translation,
                target: snapshot,
            },
        );

        match outcome.movement {
            Some(Movement::Halt) => agent.stop(true),
            Some(Movement::Pursue(destination)) => {
                agent.stop(false);
                agent.set_destination(destination);
            }
            None => {}
        }

        if let Some(point) = outcome.face {
            face_towards(&mut transform, point);
        }

        if let Some(intent) = outcome.locomotion {
            let moving = intent.is_moving();
            if moving != locomotion.moving {
                locomotion.moving = moving;
                let cue = if moving { Cue::StartMoving } else { Cue::Stop };
                cues.send(EnemyCue::new(entity, cue));
            }
            if moving {
                let speed = agent.velocity_magnitude().max(config.min_move_speed);
                cues.send(EnemyCue::new(entity, Cue::Speed(speed)));
            }
        }

        if outcome.windup_started {
            if let Some(cue) = config.cues.select(&mut rng.0) {
                cues.send(EnemyCue::new(entity, Cue::BeginAttack(cue.to_string())));
            }
        }

        match (outcome.resolution, bound) {
            (Some(AttackResolution::Hit { damage }), Some(target)) => {
                strikes.send(StrikeEvent {
                    attacker: entity,
                    target: target.health,
                    damage,
                });
                feedback.send(FeedbackEvent::AttackSound { source: entity });
            }
            (Some(AttackResolution::Missed { distance }), _) => {
                debug!("Enemy {:?} swung and missed at distance {:.2}", entity, distance);
            }
            _ => {}
        }
    }
}

/// Apply resolved enemy attacks to the target's health.
///
/// The only writer of [`PlayerHealth`]. Strikes are applied in send order.
pub fn apply_enemy_strikes(
    mut strikes: EventReader<StrikeEvent>,
    mut healths: Query<&mut PlayerHealth>,
) {
    for strike in strikes.read() {
        let Ok(mut health) = healths.get_mut(strike.target) else {
            continue;
        };
        let dealt = health.take_damage(strike.damage);
        info!(
            "Enemy {:?} hit the player for {} ({} left)",
            strike.attacker,
            dealt,
            health.current_health()
        );
    }
}
