//! Keyboard shortcut handling

use bevy::prelude::*;

use super::{EditorAction, CELL_SIZE_STEP};
use crate::app_state::AppState;
use crate::tools::ToolKind;
use crate::EditorContext;

/// Map a key press to an action for the given application state
pub fn action_for_key(key: KeyCode, ctrl: bool, state: AppState) -> Option<EditorAction> {
    match state {
        AppState::Editing if ctrl => match key {
            // Ctrl+S - Save
            KeyCode::KeyS => Some(EditorAction::Save),
            // Ctrl+O - Open
            KeyCode::KeyO => Some(EditorAction::OpenRecent),
            _ => None,
        },
        AppState::Editing => match key {
            KeyCode::Digit1 => Some(EditorAction::SelectTool(ToolKind::Platform)),
            KeyCode::Digit2 => Some(EditorAction::SelectTool(ToolKind::Ground)),
            KeyCode::Digit3 => Some(EditorAction::SelectTool(ToolKind::Enemy)),
            KeyCode::Digit4 => Some(EditorAction::SelectTool(ToolKind::Eraser)),
            KeyCode::ArrowLeft => Some(EditorAction::PanLeft),
            KeyCode::ArrowRight => Some(EditorAction::PanRight),
            KeyCode::Home | KeyCode::KeyR => Some(EditorAction::ResetCamera),
            KeyCode::KeyG => Some(EditorAction::ToggleGrid),
            KeyCode::KeyE => Some(EditorAction::NextEnemyKind),
            KeyCode::KeyB => Some(EditorAction::CycleBgScrollRate),
            KeyCode::BracketLeft => Some(EditorAction::StepCellSize(-CELL_SIZE_STEP)),
            KeyCode::BracketRight => Some(EditorAction::StepCellSize(CELL_SIZE_STEP)),
            KeyCode::Escape => Some(EditorAction::RequestState(AppState::Welcome)),
            _ => None,
        },
        AppState::Welcome if ctrl => match key {
            KeyCode::KeyO => Some(EditorAction::OpenRecent),
            _ => None,
        },
        AppState::Welcome => match key {
            KeyCode::Enter | KeyCode::NumpadEnter | KeyCode::KeyN => Some(EditorAction::NewLevel),
            KeyCode::Escape => Some(EditorAction::RequestState(AppState::Exiting)),
            _ => None,
        },
        AppState::Exiting => None,
    }
}

/// Handle keyboard shortcuts
pub fn handle_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut context: ResMut<EditorContext>,
) {
    let ctrl = keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight);

    for key in keyboard.get_just_pressed() {
        let Some(action) = action_for_key(*key, ctrl, context.app_state.current()) else {
            continue;
        };
        if let Err(e) = context.apply_action(action) {
            bevy::log::error!("{:?} failed: {}", action, e);
        }
    }
}
