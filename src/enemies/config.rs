//! Per-variant combat configuration and attack-cue selection.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

/// Which attack signal to raise when a windup starts.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum AttackCues {
    /// Always the same cue
    Fixed(String),
    /// Uniformly random among several equivalent cues
    Random(Vec<String>),
}

impl AttackCues {
    pub fn select(&self, rng: &mut impl Rng) -> Option<&str> {
        match self {
            AttackCues::Fixed(cue) => Some(cue.as_str()),
            AttackCues::Random(cues) => cues.choose(rng).map(String::as_str),
        }
    }
}

impl Default for AttackCues {
    fn default() -> Self {
        AttackCues::Fixed("Attack".to_string())
    }
}

/// Immutable combat tuning for one enemy.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct EnemyConfig {
    pub detection_range: f32,
    pub attack_range: f32,
    /// Extra reach granted only when a windup resolves
    pub attack_leeway: f32,
    pub windup_duration: f32,
    pub attack_cooldown: f32,
    pub damage: f32,
    /// Turn to face the target while in attack range
    pub face_target: bool,
    /// Floor for the reported locomotion speed while chasing
    pub min_move_speed: f32,
    pub cues: AttackCues,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            detection_range: 10.0,
            attack_range: 2.0,
            attack_leeway: 0.0,
            windup_duration: 0.0,
            attack_cooldown: 2.0,
            damage: 10.0,
            face_target: false,
            min_move_speed: 0.0,
            cues: AttackCues::default(),
        }
    }
}

impl EnemyConfig {
    /// Distance from its destination at which a chasing agent halts.
    pub fn stopping_distance(&self) -> f32 {
        (self.attack_range * 0.5).max(0.05)
    }
}

/// Randomness used for attack-cue selection.
#[derive(Resource)]
pub struct CueRng(pub rand::rngs::StdRng);

impl Default for CueRng {
    fn default() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_fixed_cue_is_always_selected() {
        let cues = AttackCues::Fixed("Gun Shoot Attack".to_string());
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            assert_eq!(cues.select(&mut rng), Some("Gun Shoot Attack"));
        }
    }

    #[test]
    fn test_random_cues_cover_all_choices() {
        let cues = AttackCues::Random(vec![
            "LeftAttack".to_string(),
            "RightAttack".to_string(),
            "SplashAttack".to_string(),
        ]);
        let mut rng = StdRng::seed_from_u64(42);

        let seen: HashSet<_> = (0..200).filter_map(|_| cues.select(&mut rng)).collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_empty_random_cues_select_nothing() {
        let cues = AttackCues::Random(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(cues.select(&mut rng), None);
    }

    #[test]
    fn test_stopping_distance_has_a_floor() {
        let mut config = EnemyConfig::default();
        assert_eq!(config.stopping_distance(), 1.0);
        config.attack_range = 0.0;
        assert_eq!(config.stopping_distance(), 0.05);
    }
}
