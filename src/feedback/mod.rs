//! Feedback module - fire-and-forget sounds for combat events.

mod audio;
mod plugin;

pub use audio::{feedback_sound, log_enemy_cues, play_feedback_sounds};
pub use plugin::FeedbackPlugin;
