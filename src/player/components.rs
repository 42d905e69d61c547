//! Player-related components.

use bevy::prelude::*;

use crate::combat::{sanitize_damage, HealthCapability};

/// Marker component for the player entity.
///
/// Enemies look this up once to find their target.
#[derive(Component)]
pub struct Player;

/// Marker for the first-person camera. Weapon rays start here.
#[derive(Component, Default)]
pub struct PlayerCamera;

/// The player's health, as seen by enemies.
///
/// Only the enemy strike system writes to this. Health is clamped to
/// `0..=maximum`.
#[derive(Component, Debug, Clone)]
pub struct PlayerHealth {
    pub current: f32,
    pub maximum: f32,
}

impl PlayerHealth {
    pub fn new(maximum: f32) -> Self {
        let maximum = maximum.max(0.0);
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}

impl Default for PlayerHealth {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl HealthCapability for PlayerHealth {
    fn current_health(&self) -> f32 {
        self.current
    }

    fn take_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - sanitize_damage(amount)).clamp(0.0, self.maximum);
        before - self.current
    }
}
