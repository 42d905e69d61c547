//! World module - arena data, validation and construction.

mod builder;
mod data;
mod error;
mod plugin;

pub use builder::{build_arena, ArenaEntity};
pub use data::{
    builtin_arena, load_arena, ArenaDefinition, ArenaDefinitionRaw, Cell, SpawnKind, SpawnPoint,
    ARENA_PATH, PLAYER_BODY_HEIGHT,
};
pub use error::ArenaError;
pub use plugin::{cleanup_arena, setup_arena, WorldPlugin};
