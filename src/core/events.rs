//! Global events used for cross-system communication.
//!
//! Emitters (weapons, hitboxes, projectiles) only ever produce a
//! [`DamageEvent`]. Resolving the amount and mutating health happens in the
//! systems that own the target, so every emitter shares one damage path.

use bevy::prelude::*;

/// Sent when something is hit and should take damage.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage (weapon holder, projectile, hazard)
    pub source: Entity,
    /// Damage value carried by the emitter, if it declared one
    pub declared: Option<f32>,
}

impl DamageEvent {
    /// A hit whose emitter knows exactly how much damage it deals.
    pub fn declared(target: Entity, source: Entity, amount: f32) -> Self {
        Self {
            target,
            source,
            declared: Some(amount),
        }
    }

    /// A hit whose damage must be discovered from the source itself.
    pub fn from_source(target: Entity, source: Entity) -> Self {
        Self {
            target,
            source,
            declared: None,
        }
    }
}

/// Sent once when an enemy transitions to dead.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity whose hit was fatal (if any)
    pub killed_by: Option<Entity>,
}

/// Sent when the player earns score, e.g. by destroying a prop.
#[derive(Event, Debug, Clone, Copy)]
pub struct ScoreEvent {
    pub points: u32,
    pub source: Entity,
}

/// Fire-and-forget audio/visual feedback requests.
///
/// Nothing acknowledges these; the feedback plugin plays what it can and
/// drops the rest.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum FeedbackEvent {
    /// An enemy's swing connected.
    AttackSound { source: Entity },
    /// An enemy died.
    DeathSound { source: Entity },
    /// The player's weapon was fired.
    MuzzleFlash { shooter: Entity },
    /// A shot struck a surface.
    Impact {
        shooter: Entity,
        point: Vec3,
        normal: Vec3,
    },
    /// A destructible prop was destroyed.
    PropDestroyed { point: Vec3 },
}
