//! Rectangle drag tool for platforms

use sidescroll_core::{Level, ViewTransform};

use super::{level_cell, PointerEvent, PointerEventKind, PreviewDescriptor, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum PlatformGesture {
    #[default]
    Idle,
    Dragging { start: (i32, i32) },
}

/// Places one platform per drag: press on the first corner, release on the opposite one
#[derive(Debug, Clone, Default)]
pub struct PlatformTool {
    gesture: PlatformGesture,
}

impl PlatformTool {
    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, PlatformGesture::Dragging { .. })
    }

    /// Drag end cell: the UI band counts as the top row, then clamped into the level
    fn end_cell(position: (i32, i32), level: &Level, view: &ViewTransform) -> (i32, i32) {
        let sy = position.1.max(view.panel_height);
        let (gx, gy) = view.screen_to_grid(position.0, sy);
        level.clamp_cell(gx, gy)
    }

    fn rect(start: (i32, i32), end: (i32, i32)) -> (i32, i32, i32, i32) {
        let (x0, x1) = (start.0.min(end.0), start.0.max(end.0));
        let (y0, y1) = (start.1.min(end.1), start.1.max(end.1));
        (x0, y0, x1 - x0 + 1, y1 - y0 + 1)
    }
}

impl Tool for PlatformTool {
    fn handle_event(
        &mut self,
        event: &PointerEvent,
        level: &mut Level,
        view: &ViewTransform,
    ) -> bool {
        match event.kind {
            PointerEventKind::Down if event.is_primary() => {
                self.gesture = match level_cell(event.position, level, view) {
                    Some(start) => PlatformGesture::Dragging { start },
                    None => PlatformGesture::Idle,
                };
                false
            }
            PointerEventKind::Up if event.is_primary() => {
                let PlatformGesture::Dragging { start } = std::mem::take(&mut self.gesture) else {
                    return false;
                };
                let end = Self::end_cell(event.position, level, view);
                let (x, y, width, height) = Self::rect(start, end);
                if width < 1 || height < 1 {
                    return false;
                }
                level.add_platform(x, y, width, height);
                true
            }
            _ => false,
        }
    }

    fn preview_for(
        &self,
        position: (i32, i32),
        level: &Level,
        view: &ViewTransform,
    ) -> Option<PreviewDescriptor> {
        match self.gesture {
            PlatformGesture::Dragging { start } => {
                let end = Self::end_cell(position, level, view);
                let (x, y, width, height) = Self::rect(start, end);
                Some(PreviewDescriptor::Rect {
                    x,
                    y,
                    width,
                    height,
                })
            }
            PlatformGesture::Idle => {
                level_cell(position, level, view).map(|(x, y)| PreviewDescriptor::Cell { x, y })
            }
        }
    }

    fn abandon(&mut self) {
        self.gesture = PlatformGesture::Idle;
    }
}
