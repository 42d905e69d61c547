//! Combat tuning loaded from `assets/data/combat.ron`.

use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::damage::DamageResolver;
use super::routing::ProjectileFilter;
use crate::core::load_or_default;

pub const COMBAT_SETTINGS_PATH: &str = "assets/data/combat.ron";

#[derive(Resource, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CombatSettings {
    /// Damage applied when a hit neither declares nor exposes a value
    pub default_incoming_damage: f32,
    /// Seconds between death and removal
    pub removal_delay: f32,
    /// Destroy player projectiles when they hit an enemy
    pub destroy_projectile_on_hit: bool,
    pub projectile: ProjectileFilter,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self {
            default_incoming_damage: 10.0,
            removal_delay: 5.0,
            destroy_projectile_on_hit: true,
            projectile: ProjectileFilter::default(),
        }
    }
}

impl CombatSettings {
    pub fn resolver(&self) -> DamageResolver {
        DamageResolver::new(self.default_incoming_damage)
    }
}

pub fn load_combat_settings(mut commands: Commands) {
    let settings: CombatSettings = load_or_default(Path::new(COMBAT_SETTINGS_PATH));
    commands.insert_resource(settings);
}
