//! Enemy stamp tool

use sidescroll_core::{Level, ViewTransform};

use super::{level_cell, PointerEvent, PointerEventKind, PreviewDescriptor, Tool};

/// Places one enemy of the selected kind per click
#[derive(Debug, Clone)]
pub struct EnemyTool {
    kind: String,
}

impl Default for EnemyTool {
    fn default() -> Self {
        Self::new(sidescroll_core::DEFAULT_ENEMY_KIND)
    }
}

impl EnemyTool {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn kind_name(&self) -> &str {
        &self.kind
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) {
        self.kind = kind.into();
    }
}

impl Tool for EnemyTool {
    fn handle_event(
        &mut self,
        event: &PointerEvent,
        level: &mut Level,
        view: &ViewTransform,
    ) -> bool {
        if event.kind != PointerEventKind::Down || !event.is_primary() {
            return false;
        }
        match level_cell(event.position, level, view) {
            Some((gx, gy)) => {
                level.add_enemy(gx, gy, &self.kind);
                true
            }
            None => false,
        }
    }

    fn preview_for(
        &self,
        position: (i32, i32),
        level: &Level,
        view: &ViewTransform,
    ) -> Option<PreviewDescriptor> {
        level_cell(position, level, view).map(|(x, y)| PreviewDescriptor::EnemyGhost {
            x,
            y,
            kind: self.kind.clone(),
        })
    }

    fn abandon(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidescroll_core::Enemy;

    #[test]
    fn test_click_places_enemy_and_registers_kind() {
        let view = ViewTransform::new(32, 64, 64);
        let mut level = Level::new();
        let mut tool = EnemyTool::new("scientist");

        // Camera scrolled by two cells
        assert!(tool.handle_event(&PointerEvent::down(10, 70), &mut level, &view));
        assert!(tool.handle_event(&PointerEvent::down(10, 70), &mut level, &view));
        assert_eq!(
            level.enemies(),
            &[Enemy::new(2, 0, "scientist"), Enemy::new(2, 0, "scientist")]
        );
        assert_eq!(level.assets.enemy_kinds, vec!["scientist"]);
    }

    #[test]
    fn test_drag_and_release_do_nothing() {
        let view = ViewTransform::new(32, 0, 64);
        let mut level = Level::new();
        let mut tool = EnemyTool::default();
        assert!(!tool.handle_event(&PointerEvent::drag(40, 100), &mut level, &view));
        assert!(!tool.handle_event(&PointerEvent::up(40, 100), &mut level, &view));
        assert!(level.enemies().is_empty());
    }

    #[test]
    fn test_preview_shows_selected_kind() {
        let view = ViewTransform::new(32, 0, 64);
        let level = Level::new();
        let tool = EnemyTool::default();
        assert_eq!(
            tool.preview_for((40, 100), &level, &view),
            Some(PreviewDescriptor::EnemyGhost {
                x: 1,
                y: 1,
                kind: "armadillo".to_string()
            })
        );
    }
}
