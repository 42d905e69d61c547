//! Enemies module - the shared combat state machine, target acquisition,
//! health lifecycle and spawning.

pub mod ai;
mod brain;
mod components;
mod config;
pub mod data;
pub mod lifecycle;
mod plugin;
mod spawning;
mod target;

pub use brain::{
    planar_distance, AttackResolution, CombatBrain, CombatState, Locomotion, Movement,
    TargetSnapshot, TickInput, TickOutcome, WINDUP_EPSILON,
};
pub use components::*;
pub use config::{AttackCues, CueRng, EnemyConfig};
pub use data::{EnemyDefinition, EnemyRegistry, EnemyVariant};
pub use lifecycle::DespawnQueue;
pub use plugin::EnemyPlugin;
pub use spawning::spawn_enemy;
pub use target::{acquire, AcquisitionError, PlayerScene, Target, TargetBinding, TargetScene};
