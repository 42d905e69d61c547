//! Error types for arena validation.

use thiserror::Error;

/// Ways an arena file can be well-formed RON but still unusable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ArenaError {
    /// Grid dimensions don't match between layers.
    #[error("Grid mismatch: layout is {expected_width}x{expected_height}, entities are {actual_width}x{actual_height}")]
    GridMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    /// A grid cell uses a character with no meaning.
    #[error("Unknown palette entry '{character}' at position ({x}, {z})")]
    UnknownPaletteEntry { character: char, x: usize, z: usize },

    /// The entity grid has no '@' cell.
    #[error("Arena has no player start")]
    MissingPlayerStart,

    /// The entity grid has more than one '@' cell.
    #[error("Arena has {0} player starts, expected one")]
    MultiplePlayerStarts(usize),
}
