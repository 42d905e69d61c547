//! Game state definitions that control the overall flow of the game.
//!
//! Enemy systems do not gate on these states directly. Instead the current
//! state is folded into the [`SimulationContext`](super::SimulationContext)
//! every frame, and the combat tick reads `active` from there.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` while data files are read
/// - Enter `InGame` once the arena is ready
/// - `Paused` freezes combat but keeps the world visible
/// - `GameOver` when the player's health reaches zero
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// Player has died
    GameOver,
}

impl GameState {
    /// Whether enemy combat logic should advance in this state.
    pub fn is_simulating(&self) -> bool {
        matches!(self, GameState::InGame)
    }
}
