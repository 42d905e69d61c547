//! Sound playback for feedback events.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};

use crate::combat::Weapon;
use crate::core::FeedbackEvent;
use crate::enemies::{EnemyCue, EnemySounds};

/// The sound file a feedback event should play, if any.
pub fn feedback_sound<'a>(
    event: &FeedbackEvent,
    enemy: Option<&'a EnemySounds>,
    weapon: Option<&'a Weapon>,
) -> Option<&'a str> {
    match event {
        FeedbackEvent::AttackSound { .. } => enemy?.attack.as_deref(),
        FeedbackEvent::DeathSound { .. } => enemy?.death.as_deref(),
        FeedbackEvent::Impact { .. } => weapon?.hit_sound.as_deref(),
        FeedbackEvent::MuzzleFlash { .. } | FeedbackEvent::PropDestroyed { .. } => None,
    }
}

/// Play whatever sounds the frame's feedback events call for.
pub fn play_feedback_sounds(
    mut events: EventReader<FeedbackEvent>,
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
    enemies: Query<&EnemySounds>,
    weapons: Query<&Weapon>,
) {
    for event in events.read() {
        let (enemy, weapon) = match *event {
            FeedbackEvent::AttackSound { source } | FeedbackEvent::DeathSound { source } => {
                (enemies.get(source).ok(), None)
            }
            FeedbackEvent::Impact { shooter, .. } => (None, weapons.get(shooter).ok()),
            FeedbackEvent::MuzzleFlash { .. } | FeedbackEvent::PropDestroyed { .. } => {
                debug!("Visual feedback: {:?}", event);
                continue;
            }
        };

        if let Some(path) = feedback_sound(event, enemy, weapon) {
            let sound: Handle<AudioSource> = asset_server.load(path.to_string());
            audio.play(sound);
        }
    }
}

/// Trace presentation cues. An animation layer would consume these instead.
pub fn log_enemy_cues(mut cues: EventReader<EnemyCue>) {
    for cue in cues.read() {
        debug!("Enemy {:?} cue {:?}", cue.enemy, cue.cue);
    }
}
