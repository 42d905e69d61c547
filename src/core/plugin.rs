//! Core plugin that sets up game states, events, and the simulation clock.

use bevy::prelude::*;

use super::context::*;
use super::events::*;
use super::sets::TickSet;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, GameOver)
/// - Global events (DamageEvent, DeathEvent, ScoreEvent, FeedbackEvent)
/// - The [`SimulationContext`] clock, advanced before anything else runs
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            .init_state::<GameState>()
            .init_resource::<SimulationContext>()
            .init_resource::<LevelScore>()
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<ScoreEvent>()
            .add_event::<FeedbackEvent>()
            .configure_sets(
                Update,
                (
                    TickSet::Placement,
                    TickSet::Emit,
                    TickSet::Resolve,
                    TickSet::Decide,
                    TickSet::Move,
                    TickSet::Cleanup,
                )
                    .chain(),
            )
            // Nothing to wait on yet, the data loaders run at Startup
            .add_systems(OnEnter(GameState::Loading), start_game)
            .add_systems(PreUpdate, advance_simulation_context)
            .add_systems(
                Update,
                handle_pause_input
                    .run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )
            .add_systems(Update, tally_score.in_set(TickSet::Cleanup));
    }
}

/// Immediately transition from Loading to InGame.
fn start_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

/// Accumulate score events into the level total.
pub fn tally_score(mut events: EventReader<ScoreEvent>, mut score: ResMut<LevelScore>) {
    for event in events.read() {
        score.0 += event.points;
        info!("Score +{} (total {})", event.points, score.0);
    }
}
