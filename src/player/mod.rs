//! Player module - the target enemies hunt, and the weapon carrier.

mod components;
mod plugin;
mod spawning;

pub use components::*;
pub use plugin::PlayerPlugin;
pub use spawning::{detect_player_defeat, spawn_player, EYE_HEIGHT};
