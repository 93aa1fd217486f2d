//! Eraser tool

use sidescroll_core::{Level, ViewTransform};

use super::{level_cell, PointerEvent, PointerEventKind, PreviewDescriptor, Tool};

/// Clears every cell pressed or dragged over with the button held
///
/// Deleting is idempotent, so the eraser keeps no stroke state.
#[derive(Debug, Clone, Default)]
pub struct EraserTool;

impl Tool for EraserTool {
    fn handle_event(
        &mut self,
        event: &PointerEvent,
        level: &mut Level,
        view: &ViewTransform,
    ) -> bool {
        match event.kind {
            PointerEventKind::Down | PointerEventKind::Move if event.is_primary() => {
                match level_cell(event.position, level, view) {
                    Some((gx, gy)) => level.delete_at(gx, gy),
                    None => false,
                }
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
        level_cell(position, level, view).map(|(x, y)| PreviewDescriptor::Cross { x, y })
    }

    fn abandon(&mut self) {}
}
