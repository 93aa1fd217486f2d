//! Standalone sidescroller level editor binary
//!
//! Run with: sidescroll_editor [levels-dir]

use bevy::prelude::*;
use bevy::window::WindowResolution;
use sidescroll_editor::app_state::AppState;
use sidescroll_editor::preferences::EditorPreferences;
use sidescroll_editor::project::LevelFileError;
use sidescroll_editor::{EditorConfig, EditorContext, EditorPlugin};

fn main() {
    let config = EditorConfig::default();
    let mut editor = EditorPlugin::new();
    if let Some(dir) = std::env::args().nth(1) {
        editor = editor.with_levels_dir(dir);
    }

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sidescroll Editor".to_string(),
                resolution: WindowResolution::new(config.window_width, config.window_height),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(editor)
        .add_systems(Startup, auto_open_last_level)
        .run();
}

/// System to auto-open the last level on startup if enabled in preferences
fn auto_open_last_level(
    mut context: ResMut<EditorContext>,
    mut preferences: ResMut<EditorPreferences>,
) {
    if !preferences.auto_open_last_level {
        return;
    }

    let Some(name) = preferences.last_level().map(str::to_string) else {
        return;
    };
    match context.load(&name) {
        Ok(()) => {
            context.app_state.request_transition(AppState::Editing);
            info!("Auto-opened last level: {}", name);
        }
        Err(LevelFileError::NotFound(path)) => {
            warn!("Last level file not found: {} ({:?})", name, path);
            preferences.remove_recent_level(&name);
            if let Err(e) = preferences.save() {
                error!("Failed to save preferences: {}", e);
            }
        }
        Err(e) => {
            warn!("Failed to auto-open level '{}': {}", name, e);
        }
    }
}
