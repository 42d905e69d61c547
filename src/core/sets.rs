//! System set ordering for one simulation tick.

use bevy::prelude::*;

/// Ordered phases of a frame of enemy simulation.
///
/// Damage is resolved before enemies decide, so an enemy killed this frame
/// never lands an attack in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Navigation placement and retry
    Placement,
    /// Damage emitters turn hits into damage events
    Emit,
    /// Damage is resolved and applied, deaths are processed
    Resolve,
    /// Enemy combat state machines run
    Decide,
    /// Navigation agents move
    Move,
    /// Delayed removal and bookkeeping
    Cleanup,
}
