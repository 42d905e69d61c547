//! Feedback plugin - plays combat sounds and traces presentation cues.

use bevy::prelude::*;

use super::audio;
use crate::core::TickSet;

/// Feedback plugin - requires `bevy_kira_audio::AudioPlugin`.
pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (audio::play_feedback_sounds, audio::log_enemy_cues).in_set(TickSet::Cleanup),
        );
    }
}
