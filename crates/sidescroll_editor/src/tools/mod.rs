//! Editor tools - platform, ground, enemy and eraser
//!
//! Each tool is a small state machine fed with pointer events. The
//! `ToolManager` routes events to the active tool; `EditorToolsPlugin` turns
//! bevy mouse input into those events.

mod enemy;
mod eraser;
mod ground;
mod platform;

pub use enemy::EnemyTool;
pub use eraser::EraserTool;
pub use ground::GroundTool;
pub use platform::PlatformTool;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use sidescroll_core::{Level, ViewTransform};

use crate::EditorContext;

/// Plugin for editor tools and viewport input
pub struct EditorToolsPlugin;

impl Plugin for EditorToolsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportInputState>()
            .add_systems(Update, handle_viewport_input);
    }
}

/// Available editing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Platform,
    Ground,
    Enemy,
    Eraser,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Platform,
        ToolKind::Ground,
        ToolKind::Enemy,
        ToolKind::Eraser,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ToolKind::Platform => "Platform",
            ToolKind::Ground => "Ground",
            ToolKind::Enemy => "Enemy",
            ToolKind::Eraser => "Delete",
        }
    }

    /// Tools that need the enemy kind selector
    pub fn uses_enemy_kind(&self) -> bool {
        matches!(self, ToolKind::Enemy)
    }
}

/// Mouse button carried by a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// A normalized pointer event in screen pixels (origin top-left, y down)
///
/// For `Move` events `button` is the button held during the motion, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: Option<PointerButton>,
    pub position: (i32, i32),
}

impl PointerEvent {
    /// Primary button pressed
    pub fn down(x: i32, y: i32) -> Self {
        Self {
            kind: PointerEventKind::Down,
            button: Some(PointerButton::Primary),
            position: (x, y),
        }
    }

    /// Pointer moved with no button held
    pub fn hover(x: i32, y: i32) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: None,
            position: (x, y),
        }
    }

    /// Pointer moved with the primary button held
    pub fn drag(x: i32, y: i32) -> Self {
        Self {
            kind: PointerEventKind::Move,
            button: Some(PointerButton::Primary),
            position: (x, y),
        }
    }

    /// Primary button released
    pub fn up(x: i32, y: i32) -> Self {
        Self {
            kind: PointerEventKind::Up,
            button: Some(PointerButton::Primary),
            position: (x, y),
        }
    }

    pub fn with_button(mut self, button: Option<PointerButton>) -> Self {
        self.button = button;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.button == Some(PointerButton::Primary)
    }
}

/// What a tool would do if the current gesture were committed now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewDescriptor {
    /// Platform rectangle in cells
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    /// Single highlighted cell
    Cell { x: i32, y: i32 },
    /// Cross-mark over the cell the eraser would clear
    Cross { x: i32, y: i32 },
    /// Translucent enemy of the given kind
    EnemyGhost { x: i32, y: i32, kind: String },
}

/// A pointer-driven editing tool
pub trait Tool {
    /// Feed one pointer event. Returns true if the level was mutated.
    fn handle_event(&mut self, event: &PointerEvent, level: &mut Level, view: &ViewTransform)
        -> bool;

    /// Preview for the pointer at `position`; never mutates gesture state
    fn preview_for(
        &self,
        position: (i32, i32),
        level: &Level,
        view: &ViewTransform,
    ) -> Option<PreviewDescriptor>;

    /// Drop any in-flight gesture without committing it
    fn abandon(&mut self);
}

/// Cell under a screen position, if it is outside the UI band and inside the level
pub(crate) fn level_cell(
    position: (i32, i32),
    level: &Level,
    view: &ViewTransform,
) -> Option<(i32, i32)> {
    let (gx, gy) = view.cell_at(position.0, position.1)?;
    level.contains_cell(gx, gy).then_some((gx, gy))
}

/// Owns one instance of every tool and routes events to the active one
#[derive(Debug, Clone)]
pub struct ToolManager {
    active: ToolKind,
    platform: PlatformTool,
    ground: GroundTool,
    enemy: EnemyTool,
    eraser: EraserTool,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ToolKind::default(), sidescroll_core::DEFAULT_ENEMY_KIND)
    }
}

impl ToolManager {
    pub fn new(initial: ToolKind, enemy_kind: impl Into<String>) -> Self {
        Self {
            active: initial,
            platform: PlatformTool::default(),
            ground: GroundTool::default(),
            enemy: EnemyTool::new(enemy_kind),
            eraser: EraserTool::default(),
        }
    }

    pub fn current_tool_kind(&self) -> ToolKind {
        self.active
    }

    /// Switch tools, abandoning the outgoing tool's gesture
    pub fn set_tool(&mut self, kind: ToolKind) {
        if kind == self.active {
            return;
        }
        self.active_mut().abandon();
        self.active = kind;
    }

    pub fn enemy_kind(&self) -> &str {
        self.enemy.kind_name()
    }

    pub fn set_enemy_kind(&mut self, kind: impl Into<String>) {
        self.enemy.set_kind(kind);
    }

    pub fn active(&self) -> &dyn Tool {
        match self.active {
            ToolKind::Platform => &self.platform,
            ToolKind::Ground => &self.ground,
            ToolKind::Enemy => &self.enemy,
            ToolKind::Eraser => &self.eraser,
        }
    }

    fn active_mut(&mut self) -> &mut dyn Tool {
        match self.active {
            ToolKind::Platform => &mut self.platform,
            ToolKind::Ground => &mut self.ground,
            ToolKind::Enemy => &mut self.enemy,
            ToolKind::Eraser => &mut self.eraser,
        }
    }

    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        level: &mut Level,
        view: &ViewTransform,
    ) -> bool {
        self.active_mut().handle_event(event, level, view)
    }

    pub fn preview_for(
        &self,
        position: (i32, i32),
        level: &Level,
        view: &ViewTransform,
    ) -> Option<PreviewDescriptor> {
        self.active().preview_for(position, level, view)
    }

    /// Abandon the gestures of every tool
    pub fn abandon_all(&mut self) {
        self.platform.abandon();
        self.ground.abandon();
        self.enemy.abandon();
        self.eraser.abandon();
    }
}

/// Mouse state carried between frames
#[derive(Resource, Default)]
pub struct ViewportInputState {
    /// Cursor position reported last frame, in window pixels
    pub last_cursor: Option<(i32, i32)>,
}

/// Translate bevy mouse input into pointer events for the editor
fn handle_viewport_input(
    windows: Query<&Window>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut input_state: ResMut<ViewportInputState>,
    mut context: ResMut<EditorContext>,
) {
    let Some(window) = windows.iter().next() else {
        return;
    };

    // Releases outside the window still finish the gesture at the last position
    let cursor = window
        .cursor_position()
        .map(|pos| (pos.x.floor() as i32, pos.y.floor() as i32))
        .or(input_state.last_cursor);
    let Some((x, y)) = cursor else {
        return;
    };

    for (mouse, button) in [
        (MouseButton::Left, PointerButton::Primary),
        (MouseButton::Middle, PointerButton::Middle),
    ] {
        if mouse_buttons.just_pressed(mouse) {
            let event = PointerEvent::down(x, y).with_button(Some(button));
            context.handle_pointer(&event);
        }
    }

    if input_state.last_cursor != Some((x, y)) {
        let held = if mouse_buttons.pressed(MouseButton::Left) {
            Some(PointerButton::Primary)
        } else if mouse_buttons.pressed(MouseButton::Middle) {
            Some(PointerButton::Middle)
        } else {
            None
        };
        context.handle_pointer(&PointerEvent::hover(x, y).with_button(held));
    }

    for (mouse, button) in [
        (MouseButton::Left, PointerButton::Primary),
        (MouseButton::Middle, PointerButton::Middle),
    ] {
        if mouse_buttons.just_released(mouse) {
            let event = PointerEvent::up(x, y).with_button(Some(button));
            context.handle_pointer(&event);
        }
    }

    input_state.last_cursor = Some((x, y));
}
