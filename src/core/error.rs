//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading RON data files.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Recoverable faults an enemy can run into.
///
/// None of these propagate. They are logged where they are detected and the
/// enemy degrades locally (idles, retries, or falls back to a default).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnemyFault {
    /// No player or no player health capability was found at startup.
    #[error("enemy {enemy:?} has no valid target: {reason}")]
    MissingTarget { enemy: bevy::prelude::Entity, reason: String },

    /// The enemy is not standing on the navigable surface yet.
    #[error("enemy {enemy:?} found no navigable surface within {radius} units, retrying")]
    NavigationUnavailable { enemy: bevy::prelude::Entity, radius: f32 },

    /// A hit carried no damage value and its source exposes none.
    #[error("damage source {origin:?} exposes no damage value, applying default {fallback}")]
    UnresolvedDamageSource { origin: bevy::prelude::Entity, fallback: f32 },
}
