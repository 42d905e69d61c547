//! Grimhold - Entry Point
//!
//! Controls:
//! - Left click: Fire
//! - Escape: Pause/Unpause

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins, with kira replacing the built-in audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Grimhold".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        // Physics, with collider outlines in place of meshes
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(RapierDebugRenderPlugin::default())

        // Audio
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(grimhold::GrimholdPlugin)

        .run();
}
