//! Grimhold - enemy behaviour and combat dispatch for a first-person arena shooter.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, the simulation clock, global events, tick ordering
//! - **Navigation**: Surface checks, guarded agent placement, steering
//! - **Combat**: Health, damage resolution, weapon and projectile hit routing
//! - **Enemies**: Definitions, target acquisition, the combat brain, death handling
//! - **Player**: The player body, camera and health pool
//! - **World**: Arena files and construction
//! - **Feedback**: Sounds for attacks, deaths and impacts
//!
//! Within a frame the systems run in [`core::TickSet`] order, so every
//! decision an enemy makes sees the damage that landed earlier that frame.

pub mod combat;
pub mod core;
pub mod enemies;
pub mod feedback;
pub mod navigation;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GrimholdPlugin;

impl Plugin for GrimholdPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Navigation before anything that spawns agents
            .add_plugins(navigation::NavigationPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Sounds
            .add_plugins(feedback::FeedbackPlugin);
    }
}
