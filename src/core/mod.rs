//! Core game module - states, events, the simulation clock and data loading.
//!
//! This module provides the foundation that all other game systems build upon.

mod context;
mod data;
mod error;
mod events;
mod plugin;
mod sets;
mod states;

pub use context::*;
pub use data::{load_or_default, load_ron_file, parse_ron};
pub use error::{DataLoadError, EnemyFault};
pub use events::*;
pub use plugin::CorePlugin;
pub use sets::TickSet;
pub use states::*;
