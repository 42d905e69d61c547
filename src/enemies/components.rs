//! Enemy-related components and events.

use bevy::prelude::*;

use super::data::EnemyVariant;

/// Marker component for all enemies.
#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub variant: EnemyVariant,
}

/// Sounds an enemy plays through the feedback layer.
#[derive(Component, Debug, Clone, Default)]
pub struct EnemySounds {
    pub attack: Option<String>,
    pub death: Option<String>,
}

/// Presentation cues raised by an enemy.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    StartMoving,
    Stop,
    /// Current locomotion speed while moving
    Speed(f32),
    /// A windup began; carries the attack cue picked for this swing
    BeginAttack(String),
    TakeDamage,
    Die,
}

/// Sent for every presentation cue. Nothing in this crate consumes these
/// beyond logging; an animation layer would.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyCue {
    pub enemy: Entity,
    pub cue: Cue,
}

impl EnemyCue {
    pub fn new(enemy: Entity, cue: Cue) -> Self {
        Self { enemy, cue }
    }
}

/// A resolved enemy attack, waiting to be applied to the target's health.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StrikeEvent {
    pub attacker: Entity,
    /// Entity carrying the target's health
    pub target: Entity,
    pub damage: f32,
}

/// Last locomotion intent reported, so start/stop cues fire on change only.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocomotionCue {
    pub moving: bool,
}
