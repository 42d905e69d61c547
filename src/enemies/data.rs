//! Enemy data loading from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use super::config::{AttackCues, EnemyConfig};
use crate::core::load_ron_file;

pub const ENEMY_DATA_DIR: &str = "assets/data/enemies";

/// The four enemy kinds. File names under `assets/data/enemies/` match the
/// lowercase variant name.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnemyVariant {
    Crawler,
    Golem,
    Skeleton,
    Zombie,
}

impl EnemyVariant {
    pub const ALL: [EnemyVariant; 4] = [
        EnemyVariant::Crawler,
        EnemyVariant::Golem,
        EnemyVariant::Skeleton,
        EnemyVariant::Zombie,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EnemyVariant::Crawler => "crawler",
            EnemyVariant::Golem => "golem",
            EnemyVariant::Skeleton => "skeleton",
            EnemyVariant::Zombie => "zombie",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|variant| variant.key() == key)
    }

    /// Built-in stats, used when no data file overrides them.
    pub fn preset(self) -> EnemyDefinition {
        let base = EnemyDefinition::default();
        match self {
            EnemyVariant::Crawler => EnemyDefinition {
                name: "Crawler".to_string(),
                windup_duration: 0.15,
                attack_leeway: 0.25,
                attack_cues: AttackCues::Fixed("Gun Shoot Attack".to_string()),
                ..base
            },
            EnemyVariant::Golem => EnemyDefinition {
                name: "Golem".to_string(),
                max_health: 150.0,
                damage: 20.0,
                attack_range: 2.5,
                windup_duration: 0.3,
                move_speed: 2.5,
                face_target: true,
                attack_cues: AttackCues::Fixed("Attack".to_string()),
                collider: ColliderConfig {
                    half_height: 0.8,
                    radius: 0.6,
                },
                ..base
            },
            EnemyVariant::Skeleton => EnemyDefinition {
                name: "Skeleton".to_string(),
                windup_duration: 0.15,
                attack_leeway: 0.25,
                attack_cues: AttackCues::Random(vec![
                    "LeftAttack".to_string(),
                    "RightAttack".to_string(),
                    "SplashAttack".to_string(),
                ]),
                ..base
            },
            EnemyVariant::Zombie => EnemyDefinition {
                name: "Zombie".to_string(),
                detection_range: 15.0,
                min_move_speed: 1.0,
                attack_cues: AttackCues::Fixed("Attack".to_string()),
                ..base
            },
        }
    }
}

impl fmt::Display for EnemyVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Collider configuration for an enemy type.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl ColliderConfig {
    /// Height of the top of the body capsule above the enemy's feet.
    pub fn standing_height(&self) -> f32 {
        2.0 * (self.half_height + self.radius)
    }
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.3,
        }
    }
}

/// Sound asset paths for an enemy type.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SoundConfig {
    pub attack: Option<String>,
    pub death: Option<String>,
}

/// Enemy definition loaded from RON file.
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_leeway: f32,
    pub windup_duration: f32,
    pub attack_cooldown: f32,
    pub face_target: bool,
    pub min_move_speed: f32,
    pub attack_cues: AttackCues,
    pub sounds: SoundConfig,
    pub collider: ColliderConfig,
}

impl Default for EnemyDefinition {
    fn default() -> Self {
        Self {
            name: "Enemy".to_string(),
            max_health: 100.0,
            damage: 10.0,
            move_speed: 3.5,
            detection_range: 10.0,
            attack_range: 2.0,
            attack_leeway: 0.0,
            windup_duration: 0.0,
            attack_cooldown: 2.0,
            face_target: false,
            min_move_speed: 0.0,
            attack_cues: AttackCues::default(),
            sounds: SoundConfig::default(),
            collider: ColliderConfig::default(),
        }
    }
}

impl EnemyDefinition {
    /// Convert to the immutable combat config component.
    pub fn to_config(&self) -> EnemyConfig {
        EnemyConfig {
            detection_range: self.detection_range,
            attack_range: self.attack_range,
            attack_leeway: self.attack_leeway.max(0.0),
            windup_duration: self.windup_duration,
            attack_cooldown: self.attack_cooldown.max(0.0),
            damage: self.damage,
            face_target: self.face_target,
            min_move_speed: self.min_move_speed,
            cues: self.attack_cues.clone(),
        }
    }
}

/// Resource holding all loaded enemy definitions.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<EnemyVariant, EnemyDefinition>,
}

impl EnemyRegistry {
    /// Definition for a variant, falling back to its built-in preset.
    pub fn get(&self, variant: EnemyVariant) -> EnemyDefinition {
        self.definitions
            .get(&variant)
            .cloned()
            .unwrap_or_else(|| variant.preset())
    }
}

/// Load all enemy definitions from the assets/data/enemies/ directory.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>) {
    let enemies_dir = Path::new(ENEMY_DATA_DIR);

    if !enemies_dir.exists() {
        warn!("Enemy definitions directory not found: {:?}, using presets", enemies_dir);
        return;
    }

    let Ok(entries) = fs::read_dir(enemies_dir) else {
        warn!("Failed to read enemy definitions directory");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let Some(variant) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(EnemyVariant::from_key)
        else {
            warn!("Unknown enemy type file {:?}, skipping", path);
            continue;
        };

        match load_ron_file::<EnemyDefinition>(&path) {
            Ok(definition) => {
                info!("Loaded enemy definition: {} ({})", definition.name, variant);
                registry.definitions.insert(variant, definition);
            }
            Err(e) => {
                error!("{}; using {} preset", e, variant);
            }
        }
    }

    info!("Loaded {} enemy definitions", registry.definitions.len());
}
