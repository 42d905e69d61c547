//! Combat-related components and capabilities.

use bevy::prelude::*;
use serde::Deserialize;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

/// Something that exposes a current health value and can be hurt.
///
/// This is the target-side contract enemies attack through. They never need
/// to know what concrete kind of thing they are hitting.
pub trait HealthCapability {
    fn current_health(&self) -> f32;

    /// Apply `amount` of damage, returning how much was actually removed.
    fn take_damage(&mut self, amount: f32) -> f32;
}

/// Something that carries a damage value it inflicts on hit.
pub trait Damaging {
    fn damage(&self) -> f32;
}

/// What an [`Health::apply_damage`] call did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthChange {
    /// Already dead, nothing changed
    Ignored,
    /// Health went down but is still above zero
    Wounded { dealt: f32, remaining: f32 },
    /// This hit was fatal
    Killed { dealt: f32 },
}

/// Health for entities that can be killed (enemies, breakable props).
///
/// Once dead, the value is frozen: further damage and further deaths are
/// no-ops.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
    dead: bool,
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            maximum: max,
            dead: false,
        }
    }

    pub fn apply_damage(&mut self, amount: f32) -> HealthChange {
        if self.dead {
            return HealthChange::Ignored;
        }

        let dealt = sanitize_damage(amount).min(self.current);
        self.current -= dealt;

        if self.current <= 0.0 {
            self.current = 0.0;
            self.die();
            HealthChange::Killed { dealt }
        } else {
            HealthChange::Wounded {
                dealt,
                remaining: self.current,
            }
        }
    }

    /// Mark as dead. Returns `false` if it already was.
    pub fn die(&mut self) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        true
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        (self.current / self.maximum).clamp(0.0, 1.0)
    }

    /// Whole-number readout for health labels, clamped to 0..=100.
    pub fn display_value(&self) -> u32 {
        self.current.round().clamp(0.0, 100.0) as u32
    }
}

/// Damage is never negative; NaN counts as no damage.
pub fn sanitize_damage(amount: f32) -> f32 {
    if amount.is_nan() {
        0.0
    } else {
        amount.max(0.0)
    }
}

/// Marker for entities that have died (stops AI, navigation and further hits).
#[derive(Component, Debug)]
pub struct Dead;

/// Hitscan weapon carried by the player.
#[derive(Component, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Weapon {
    pub name: String,
    pub damage: f32,
    /// Maximum ray length
    pub range: f32,
    /// Impulse applied to dynamic bodies that get hit
    pub impact_force: f32,
    /// Sound played on impact
    pub hit_sound: Option<String>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self {
            name: "Pistol".to_string(),
            damage: 10.0,
            range: 10.0,
            impact_force: 5.0,
            hit_sound: None,
        }
    }
}

impl Damaging for Weapon {
    fn damage(&self) -> f32 {
        self.damage
    }
}

/// A physical projectile (bullet, bolt) with its own damage value.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub damage: f32,
}

impl Damaging for Projectile {
    fn damage(&self) -> f32 {
        self.damage
    }
}

/// Environmental damage source (spikes, fire, particle emitters).
#[derive(Component, Debug, Clone)]
pub struct Hazard {
    pub damage_per_hit: f32,
}

impl Damaging for Hazard {
    fn damage(&self) -> f32 {
        self.damage_per_hit
    }
}

/// A sub-collider that forwards hits to the enemy that owns it.
#[derive(Component, Debug, Clone, Default)]
pub struct Hitbox {
    /// Owning enemy. Resolved from ancestors at startup when left empty.
    pub owner: Option<Entity>,
}

impl Hitbox {
    pub fn owned_by(owner: Entity) -> Self {
        Self { owner: Some(owner) }
    }
}

/// A prop that breaks when shot and awards score.
#[derive(Component, Debug, Clone)]
pub struct Destructible {
    pub points: u32,
}

impl Default for Destructible {
    fn default() -> Self {
        Self { points: 1 }
    }
}

/// Free-form identity tag, used to recognise player projectiles.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct ObjectTag(pub String);

/// Sent by particle systems when a particle strikes an entity.
#[derive(Event, Debug, Clone, Copy)]
pub struct ParticleImpact {
    /// The particle emitter
    pub particle: Entity,
    /// The entity that was struck
    pub target: Entity,
}

/// Request to fire the weapon carried by `shooter`.
#[derive(Event, Debug, Clone, Copy)]
pub struct WeaponFired {
    pub shooter: Entity,
}

/// A weapon ray that struck a collider.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct WeaponHit {
    pub shooter: Entity,
    pub struck: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    /// Direction the ray travelled
    pub direction: Vec3,
}
