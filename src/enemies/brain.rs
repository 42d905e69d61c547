//! The combat state machine every enemy variant runs.
//!
//! Pure logic: no ECS access. The enemy systems feed it a snapshot of the
//! world and carry out the [`TickOutcome`] it returns.

use bevy::prelude::*;

use super::config::EnemyConfig;

/// Smallest possible windup, so an attack never resolves on the tick it starts.
pub const WINDUP_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CombatState {
    #[default]
    Idle,
    /// Engaged with the target: closing in, or waiting out the cooldown
    Chasing,
    WindingUp {
        resolve_at: f32,
    },
    Dead,
}

/// What the enemy knows about its target this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub position: Vec3,
    pub health: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickInput {
    pub now: f32,
    pub position: Vec3,
    /// `None` when no target was ever acquired
    pub target: Option<TargetSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Movement {
    Halt,
    Pursue(Vec3),
}

/// Locomotion intent for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locomotion {
    /// Engaged or without a target, standing still
    NotMoving,
    Moving,
    /// Nothing in detection range
    Idle,
}

impl Locomotion {
    pub fn is_moving(self) -> bool {
        self == Locomotion::Moving
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttackResolution {
    Hit { damage: f32 },
    Missed { distance: f32 },
}

/// Everything one tick decided.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickOutcome {
    pub movement: Option<Movement>,
    pub locomotion: Option<Locomotion>,
    /// Point to turn towards
    pub face: Option<Vec3>,
    pub windup_started: bool,
    pub resolution: Option<AttackResolution>,
}

/// Per-enemy combat state.
#[derive(Component, Debug, Clone, Default)]
pub struct CombatBrain {
    state: CombatState,
    /// `None` until the first attack resolves
    last_attack_time: Option<f32>,
}

impl CombatBrain {
    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn last_attack_time(&self) -> Option<f32> {
        self.last_attack_time
    }

    pub fn scheduled_attack_time(&self) -> Option<f32> {
        match self.state {
            CombatState::WindingUp { resolve_at } => Some(resolve_at),
            _ => None,
        }
    }

    pub fn is_winding_up(&self) -> bool {
        matches!(self.state, CombatState::WindingUp { .. })
    }

    pub fn is_dead(&self) -> bool {
        self.state == CombatState::Dead
    }

    pub fn cooldown_elapsed(&self, config: &EnemyConfig, now: f32) -> bool {
        self.last_attack_time
            .map_or(true, |last| now >= last + config.attack_cooldown)
    }

    /// Enter the terminal state. Returns `false` if already dead.
    pub fn kill(&mut self) -> bool {
        if self.is_dead() {
            return false;
        }
        self.state = CombatState::Dead;
        true
    }

    pub fn tick(&mut self, config: &EnemyConfig, input: TickInput) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.is_dead() {
            return outcome;
        }

        // No target, or a dead one: hold still and never attack
        let Some(target) = input.target.filter(|target| target.health > 0.0) else {
            outcome.movement = Some(Movement::Halt);
            outcome.locomotion = Some(Locomotion::NotMoving);
            return outcome;
        };

        let distance = planar_distance(input.position, target.position);

        // A windup that is due resolves before anything can cancel it
        if let CombatState::WindingUp { resolve_at } = self.state {
            if input.now >= resolve_at {
                outcome.resolution = Some(if distance <= config.attack_range + config.attack_leeway {
                    AttackResolution::Hit {
                        damage: config.damage,
                    }
                } else {
                    AttackResolution::Missed { distance }
                });
                self.state = CombatState::Chasing;
                self.last_attack_time = Some(input.now);
            }
        }

        if distance <= config.attack_range {
            outcome.movement = Some(Movement::Halt);
            outcome.locomotion = Some(Locomotion::NotMoving);
            if config.face_target {
                outcome.face = Some(target.position);
            }

            if !self.is_winding_up()
                && outcome.resolution.is_none()
                && self.cooldown_elapsed(config, input.now)
            {
                self.state = CombatState::WindingUp {
                    resolve_at: input.now + config.windup_duration.max(WINDUP_EPSILON),
                };
                outcome.windup_started = true;
            } else if self.state == CombatState::Idle {
                self.state = CombatState::Chasing;
            }
        } else if distance <= config.detection_range {
            outcome.movement = Some(Movement::Pursue(target.position));
            outcome.locomotion = Some(Locomotion::Moving);
            self.state = CombatState::Chasing;
        } else {
            outcome.movement = Some(Movement::Halt);
            outcome.locomotion = Some(Locomotion::Idle);
            self.state = CombatState::Idle;
        }

        outcome
    }
}

/// Distance on the horizontal plane; height differences are ignored.
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(b.x - a.x, b.z - a.z).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crawler() -> EnemyConfig {
        EnemyConfig {
            detection_range: 10.0,
            attack_range: 2.0,
            attack_leeway: 0.25,
            windup_duration: 0.15,
            attack_cooldown: 2.0,
            damage: 10.0,
            ..default()
        }
    }

    fn at(now: f32, distance: f32) -> TickInput {
        TickInput {
            now,
            position: Vec3::ZERO,
            target: Some(TargetSnapshot {
                position: Vec3::new(distance, 0.0, 0.0),
                health: 100.0,
            }),
        }
    }

    fn hits(outcome: &TickOutcome) -> usize {
        matches!(outcome.resolution, Some(AttackResolution::Hit { .. })) as usize
    }

    #[test]
    fn test_scenario_windup_then_hit() {
        let config = crawler();
        let mut brain = CombatBrain::default();

        let start = brain.tick(&config, at(0.0, 1.0));
        assert!(start.windup_started);
        assert_eq!(start.movement, Some(Movement::Halt));
        assert_eq!(brain.scheduled_attack_time(), Some(0.15));

        let resolve = brain.tick(&config, at(0.15, 1.0));
        assert_eq!(resolve.resolution, Some(AttackResolution::Hit { damage: 10.0 }));
        assert!(!resolve.windup_started);
        assert_eq!(brain.last_attack_time(), Some(0.15));
        assert!(!brain.is_winding_up());
    }

    #[test]
    fn test_scenario_target_escapes_leeway() {
        let config = crawler();
        let mut brain = CombatBrain::default();

        brain.tick(&config, at(0.0, 1.0));
        let resolve = brain.tick(&config, at(0.15, 2.3));

        assert!(matches!(
            resolve.resolution,
            Some(AttackResolution::Missed { distance }) if (distance - 2.3).abs() < 1e-5
        ));
        assert_eq!(brain.last_attack_time(), Some(0.15));
        // Target is outside attack range, so the enemy resumes the chase
        assert_eq!(resolve.movement, Some(Movement::Pursue(Vec3::new(2.3, 0.0, 0.0))));
    }

    #[test]
    fn test_leeway_absorbs_small_retreat() {
        let config = crawler();
        let mut brain = CombatBrain::default();

        brain.tick(&config, at(0.0, 2.0));
        let resolve = brain.tick(&config, at(0.2, 2.25));
        assert_eq!(resolve.resolution, Some(AttackResolution::Hit { damage: 10.0 }));
    }

    #[test]
    fn test_dead_target_stops_everything() {
        let config = crawler();
        let mut brain = CombatBrain::default();

        let chase = brain.tick(&config, at(0.0, 6.0));
        assert_eq!(chase.locomotion, Some(Locomotion::Moving));
        assert_eq!(brain.state(), CombatState::Chasing);

        let mut input = at(0.1, 1.0);
        input.target = input.target.map(|target| TargetSnapshot { health: 0.0, ..target });
        for step in 0..20 {
            input.now = 0.1 + step as f32 * 0.1;
            let outcome = brain.tick(&config, input);
            assert_eq!(outcome.movement, Some(Movement::Halt));
            assert_eq!(outcome.locomotion, Some(Locomotion::NotMoving));
            assert!(!outcome.windup_started);
            assert_eq!(outcome.resolution, None);
        }
    }

    #[test]
    fn test_missing_target_keeps_enemy_idle() {
        let config = crawler();
        let mut brain = CombatBrain::default();
        let outcome = brain.tick(
            &config,
            TickInput {
                now: 1.0,
                position: Vec3::ZERO,
                target: None,
            },
        );
        assert_eq!(outcome.movement, Some(Movement::Halt));
        assert_eq!(brain.state(), CombatState::Idle);
    }

    #[test]
    fn test_leaving_attack_range_cancels_pending_windup() {
        let config = crawler();
        let mut brain = CombatBrain::default();

        brain.tick(&config, at(0.0, 1.5));
        brain.tick(&config, at(0.05, 5.0));
        assert!(!brain.is_winding_up());
        assert_eq!(brain.last_attack_time(), None);

        let outside = brain.tick(&config, at(0.1, 30.0));
        assert_eq!(outside.locomotion, Some(Locomotion::Idle));
        assert_eq!(brain.state(), CombatState::Idle);
    }

    #[test]
    fn test_cooldown_spaces_out_hits() {
        let config = crawler();
        let mut brain = CombatBrain::default();
        let mut hit_times = Vec::new();
        let mut windups = 0;

        // Ten seconds at 60 ticks per second, target glued in range
        for frame in 0..600 {
            let now = frame as f32 / 60.0;
            let outcome = brain.tick(&config, at(now, 1.0));
            windups += outcome.windup_started as usize;
            if hits(&outcome) == 1 {
                hit_times.push(now);
            }
        }

        assert!(hit_times.len() >= 4);
        for pair in hit_times.windows(2) {
            assert!(pair[1] - pair[0] >= config.attack_cooldown);
        }
        // Every resolved windup was started exactly once
        assert!(windups == hit_times.len() || windups == hit_times.len() + 1);
    }

    #[test]
    fn test_zero_windup_never_resolves_on_same_tick() {
        let config = EnemyConfig {
            windup_duration: 0.0,
            attack_leeway: 0.0,
            ..crawler()
        };
        let mut brain = CombatBrain::default();

        let start = brain.tick(&config, at(3.0, 1.0));
        assert!(start.windup_started);
        assert_eq!(start.resolution, None);
        assert_eq!(brain.scheduled_attack_time(), Some(3.0 + WINDUP_EPSILON));
    }

    #[test]
    fn test_golem_faces_target_in_range() {
        let config = EnemyConfig {
            face_target: true,
            ..crawler()
        };
        let mut brain = CombatBrain::default();
        let outcome = brain.tick(&config, at(0.0, 1.0));
        assert_eq!(outcome.face, Some(Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_height_difference_is_ignored() {
        let config = crawler();
        let mut brain = CombatBrain::default();
        let mut input = at(0.0, 1.0);
        input.target = input.target.map(|target| TargetSnapshot {
            position: target.position + Vec3::Y * 8.0,
            ..target
        });
        assert!(brain.tick(&config, input).windup_started);
    }

    #[test]
    fn test_dead_brain_is_terminal() {
        let config = crawler();
        let mut brain = CombatBrain::default();
        brain.tick(&config, at(0.0, 1.0));

        assert!(brain.kill());
        assert!(!brain.kill());
        assert_eq!(brain.tick(&config, at(0.15, 1.0)), TickOutcome::default());
        assert_eq!(brain.state(), CombatState::Dead);
    }
}
