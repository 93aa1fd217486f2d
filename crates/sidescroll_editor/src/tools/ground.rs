//! Paint-by-drag ground tool

use sidescroll_core::{Level, ViewTransform};

use super::{level_cell, PointerEvent, PointerEventKind, PreviewDescriptor, Tool};

/// Adds one ground cell per distinct cell visited while the button is held
///
/// A stroke may start anywhere, including the UI band; every in-level cell
/// dragged over with the button held is painted.
#[derive(Debug, Clone, Default)]
pub struct GroundTool {
    /// Last cell painted in the current stroke
    last_cell: Option<(i32, i32)>,
}

impl GroundTool {
    fn paint(&mut self, event: &PointerEvent, level: &mut Level, view: &ViewTransform) -> bool {
        let Some(cell) = level_cell(event.position, level, view) else {
            return false;
        };
        if self.last_cell == Some(cell) {
            return false;
        }
        self.last_cell = Some(cell);
        level.add_ground(cell.0, cell.1, 1)
    }
}

impl Tool for GroundTool {
    fn handle_event(
        &mut self,
        event: &PointerEvent,
        level: &mut Level,
        view: &ViewTransform,
    ) -> bool {
        if !event.is_primary() {
            return false;
        }
        match event.kind {
            PointerEventKind::Down => {
                self.abandon();
                self.paint(event, level, view)
            }
            PointerEventKind::Move => self.paint(event, level, view),
            PointerEventKind::Up => {
                self.abandon();
                false
            }
        }
    }

    fn preview_for(
        &self,
        position: (i32, i32),
        level: &Level,
        view: &ViewTransform,
    ) -> Option<PreviewDescriptor> {
        level_cell(position, level, view).map(|(x, y)| PreviewDescriptor::Cell { x, y })
    }

    fn abandon(&mut self) {
        self.last_cell = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidescroll_core::GroundRun;

    fn view() -> ViewTransform {
        ViewTransform::new(32, 0, 64)
    }

    fn at(gx: i32, gy: i32) -> (i32, i32) {
        let (sx, sy) = view().grid_to_screen(gx, gy);
        (sx + 10, sy + 10)
    }

    #[test]
    fn test_stroke_builds_one_run() {
        let mut level = Level::new();
        let mut tool = GroundTool::default();
        let (x, y) = at(2, 12);
        assert!(tool.handle_event(&PointerEvent::down(x, y), &mut level, &view()));
        for gx in 3..7 {
            let (x, y) = at(gx, 12);
            assert!(tool.handle_event(&PointerEvent::drag(x, y), &mut level, &view()));
        }
        tool.handle_event(&PointerEvent::up(x, y), &mut level, &view());
        assert_eq!(level.ground_runs(), &[GroundRun::new(2, 12, 5)]);
    }

    #[test]
    fn test_lingering_in_cell_paints_once() {
        let mut level = Level::new();
        let mut tool = GroundTool::default();
        let (x, y) = at(4, 4);
        tool.handle_event(&PointerEvent::down(x, y), &mut level, &view());
        assert!(!tool.handle_event(&PointerEvent::drag(x + 3, y + 2), &mut level, &view()));
        assert!(!tool.handle_event(&PointerEvent::drag(x + 6, y), &mut level, &view()));
        assert_eq!(level.ground_runs(), &[GroundRun::new(4, 4, 1)]);
    }

    #[test]
    fn test_stroke_from_panel_paints_once_inside() {
        let mut level = Level::new();
        let mut tool = GroundTool::default();
        // Pressed in the UI band, then dragged into the level
        assert!(!tool.handle_event(&PointerEvent::down(40, 10), &mut level, &view()));
        assert!(tool.handle_event(&PointerEvent::drag(40, 100), &mut level, &view()));
        assert_eq!(level.ground_runs(), &[GroundRun::new(1, 1, 1)]);

        // Moving without the button never paints
        let (x, y) = at(5, 4);
        assert!(!tool.handle_event(&PointerEvent::hover(x, y), &mut level, &view()));
        assert_eq!(level.ground_runs().len(), 1);
    }

    #[test]
    fn test_painting_existing_ground_reports_no_change() {
        let mut level = Level::new();
        level.add_ground(2, 3, 3);
        let mut tool = GroundTool::default();
        let (x, y) = at(3, 3);
        assert!(!tool.handle_event(&PointerEvent::down(x, y), &mut level, &view()));
        let (x, y) = at(5, 3);
        assert!(tool.handle_event(&PointerEvent::drag(x, y), &mut level, &view()));
        assert_eq!(level.ground_runs(), &[GroundRun::new(2, 3, 4)]);
    }

    #[test]
    fn test_drag_out_of_level_is_skipped() {
        let mut level = Level::with_dimensions(5, 5, 32);
        let mut tool = GroundTool::default();
        let (x, y) = at(4, 1);
        tool.handle_event(&PointerEvent::down(x, y), &mut level, &view());
        let (x, y) = at(5, 1);
        assert!(!tool.handle_event(&PointerEvent::drag(x, y), &mut level, &view()));
        assert!(!tool.handle_event(&PointerEvent::drag(x, 20), &mut level, &view()));
        assert_eq!(level.ground_runs(), &[GroundRun::new(4, 1, 1)]);
    }

    #[test]
    fn test_new_stroke_may_repaint_last_cell() {
        let mut level = Level::new();
        let mut tool = GroundTool::default();
        let (x, y) = at(1, 1);
        tool.handle_event(&PointerEvent::down(x, y), &mut level, &view());
        level.delete_at(1, 1);
        // Release never arrived; the next press resets the stroke
        assert!(tool.handle_event(&PointerEvent::down(x, y), &mut level, &view()));
        assert_eq!(level.ground_runs(), &[GroundRun::new(1, 1, 1)]);
    }
}
