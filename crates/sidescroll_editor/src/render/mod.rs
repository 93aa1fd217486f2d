//! Level overlay for the editor viewport
//!
//! Draws the level with gizmos: grid, platforms, ground runs, enemies and
//! the active tool's preview. Sprite and parallax rendering belong to the
//! game; the editor only needs outlines to place things.

use bevy::math::Isometry2d;
use bevy::prelude::*;
use sidescroll_core::{Level, ViewTransform};

use crate::app_state::AppState;
use crate::tools::{PreviewDescriptor, ViewportInputState};
use crate::EditorContext;

const PANEL_COLOR: Color = Color::srgb(0.35, 0.35, 0.4);
const GRID_COLOR: Color = Color::srgba(0.5, 0.5, 0.5, 0.35);
const BOUNDS_COLOR: Color = Color::srgb(0.8, 0.8, 0.8);
const PLATFORM_COLOR: Color = Color::srgb(0.59, 0.29, 0.0);
const GROUND_COLOR: Color = Color::srgb(0.27, 0.16, 0.0);
const ENEMY_COLOR: Color = Color::srgb(0.9, 0.1, 0.1);
const PREVIEW_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.7);
const ERASE_COLOR: Color = Color::srgb(1.0, 0.3, 0.3);

/// Plugin for the editor overlay
pub struct EditorRenderPlugin;

impl Plugin for EditorRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (draw_level_overlay, sync_window_title).after(crate::apply_state_transitions),
        );
    }
}

/// Maps screen pixels (origin top-left, y down) onto the 2D camera's canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenCanvas {
    pub width: f32,
    pub height: f32,
}

impl ScreenCanvas {
    pub fn point(&self, sx: i32, sy: i32) -> Vec2 {
        Vec2::new(sx as f32 - self.width / 2.0, self.height / 2.0 - sy as f32)
    }

    /// Center and size of a screen rectangle
    pub fn rect(&self, sx: i32, sy: i32, width: i32, height: i32) -> (Vec2, Vec2) {
        let size = Vec2::new(width as f32, height as f32);
        let top_left = self.point(sx, sy);
        (top_left + Vec2::new(size.x, -size.y) / 2.0, size)
    }
}

/// Window title for the current session state
pub fn window_title(context: &EditorContext) -> String {
    match context.app_state.current() {
        AppState::Welcome => {
            "Sidescroll Editor - Enter: new level | Ctrl+O: open recent | Esc: quit".to_string()
        }
        AppState::Editing => {
            let mut title = format!(
                "Sidescroll Editor - {} - {} tool",
                context.level_name,
                context.tools.current_tool_kind().label()
            );
            if context.tools.current_tool_kind().uses_enemy_kind() {
                title.push_str(&format!(" ({})", context.tools.enemy_kind()));
            }
            title
        }
        AppState::Exiting => "Sidescroll Editor".to_string(),
    }
}

fn sync_window_title(context: Res<EditorContext>, mut windows: Query<&mut Window>) {
    let title = window_title(&context);
    for mut window in &mut windows {
        if window.title != title {
            window.title = title.clone();
        }
    }
}

fn draw_level_overlay(
    mut gizmos: Gizmos,
    context: Res<EditorContext>,
    input_state: Res<ViewportInputState>,
    windows: Query<&Window>,
) {
    if context.app_state.current() != AppState::Editing {
        return;
    }
    let Some(window) = windows.iter().next() else {
        return;
    };
    let canvas = ScreenCanvas {
        width: window.resolution.width(),
        height: window.resolution.height(),
    };
    let view = context.view();
    let level = &context.level;
    let cell = view.cell_size;

    // UI band
    let (center, size) = canvas.rect(0, 0, canvas.width as i32, view.panel_height);
    gizmos.rect_2d(Isometry2d::from_translation(center), size, PANEL_COLOR);

    if context.show_grid {
        draw_grid(&mut gizmos, &canvas, &context);
    }
    let (width, height) = level_size_cells(level);
    draw_cell_rect(&mut gizmos, &canvas, &view, (0, 0, width, height), BOUNDS_COLOR);

    for platform in level.platforms() {
        draw_cell_rect(
            &mut gizmos,
            &canvas,
            &view,
            (platform.x, platform.y, platform.width, platform.height),
            PLATFORM_COLOR,
        );
    }
    for run in level.ground_runs() {
        draw_cell_rect(&mut gizmos, &canvas, &view, (run.x, run.y, run.width, 1), GROUND_COLOR);
    }
    for enemy in level.enemies() {
        let (sx, sy) = view.grid_to_screen(enemy.x, enemy.y);
        let center = canvas.point(sx + cell / 2, sy + cell / 2);
        gizmos.circle_2d(
            Isometry2d::from_translation(center),
            cell as f32 * 0.4,
            ENEMY_COLOR,
        );
    }

    let Some(position) = input_state.last_cursor else {
        return;
    };
    match context.preview(position) {
        Some(PreviewDescriptor::Rect {
            x,
            y,
            width,
            height,
        }) => draw_cell_rect(
            &mut gizmos,
            &canvas,
            &view,
            (x, y, width, height),
            PREVIEW_COLOR,
        ),
        Some(PreviewDescriptor::Cell { x, y }) => {
            draw_cell_rect(&mut gizmos, &canvas, &view, (x, y, 1, 1), PREVIEW_COLOR)
        }
        Some(PreviewDescriptor::EnemyGhost { x, y, .. }) => {
            let (sx, sy) = view.grid_to_screen(x, y);
            let center = canvas.point(sx + cell / 2, sy + cell / 2);
            gizmos.circle_2d(
                Isometry2d::from_translation(center),
                cell as f32 * 0.4,
                PREVIEW_COLOR,
            );
        }
        Some(PreviewDescriptor::Cross { x, y }) => {
            let (sx, sy) = view.grid_to_screen(x, y);
            gizmos.line_2d(
                canvas.point(sx, sy),
                canvas.point(sx + cell, sy + cell),
                ERASE_COLOR,
            );
            gizmos.line_2d(
                canvas.point(sx + cell, sy),
                canvas.point(sx, sy + cell),
                ERASE_COLOR,
            );
        }
        None => {}
    }
}

/// Outline a rectangle given in cells as `(x, y, width, height)`
fn draw_cell_rect(
    gizmos: &mut Gizmos,
    canvas: &ScreenCanvas,
    view: &ViewTransform,
    (gx, gy, width, height): (i32, i32, i32, i32),
    color: Color,
) {
    let (sx, sy) = view.grid_to_screen(gx, gy);
    let (center, size) = canvas.rect(
        sx,
        sy,
        width.saturating_mul(view.cell_size),
        height.saturating_mul(view.cell_size),
    );
    gizmos.rect_2d(Isometry2d::from_translation(center), size, color);
}

fn level_size_cells(level: &Level) -> (i32, i32) {
    (
        level.width().min(i32::MAX as u32) as i32,
        level.height().min(i32::MAX as u32) as i32,
    )
}

/// Grid lines for the visible part of the level only
fn draw_grid(gizmos: &mut Gizmos, canvas: &ScreenCanvas, context: &EditorContext) {
    let view = context.view();
    let (width, height) = level_size_cells(&context.level);
    let (first_col, last_col, last_row) = visible_grid(&view, canvas, width, height);

    let (_, top) = view.grid_to_screen(0, 0);
    let (_, bottom) = view.grid_to_screen(0, last_row);
    for gx in first_col..=last_col {
        let (sx, _) = view.grid_to_screen(gx, 0);
        gizmos.line_2d(canvas.point(sx, top), canvas.point(sx, bottom), GRID_COLOR);
    }

    let (left, _) = view.grid_to_screen(first_col, 0);
    let (right, _) = view.grid_to_screen(last_col, 0);
    for gy in 0..=last_row {
        let (_, sy) = view.grid_to_screen(0, gy);
        gizmos.line_2d(canvas.point(left, sy), canvas.point(right, sy), GRID_COLOR);
    }
}

/// First and last grid column and last grid row that reach the window
fn visible_grid(
    view: &ViewTransform,
    canvas: &ScreenCanvas,
    width: i32,
    height: i32,
) -> (i32, i32, i32) {
    let cell = view.cell_size;
    let first_col = (view.offset_x / cell).max(0).min(width);
    let last_col = (view.offset_x.saturating_add(canvas.width as i32) / cell)
        .saturating_add(1)
        .min(width);
    let last_row = ((canvas.height as i32 - view.panel_height).max(0) / cell)
        .saturating_add(1)
        .min(height);
    (first_col, last_col, last_row)
}
