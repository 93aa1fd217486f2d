//! Records placed on the level grid

use serde::{Deserialize, Serialize};

/// Enemy kind used when none is selected or a record omits it
pub const DEFAULT_ENEMY_KIND: &str = "armadillo";

/// An axis-aligned platform rectangle in grid cells
///
/// Platforms are independent: each placement creates exactly one record and
/// they are never merged or split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Platform {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Platform {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Check if the cell lies inside this rectangle
    pub fn contains(&self, gx: i32, gy: i32) -> bool {
        self.x <= gx && gx < self.x + self.width && self.y <= gy && gy < self.y + self.height
    }
}

/// A horizontal run of ground cells on row `y`, starting at column `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundRun {
    pub x: i32,
    pub y: i32,
    pub width: i32,
}

impl GroundRun {
    pub fn new(x: i32, y: i32, width: i32) -> Self {
        Self { x, y, width }
    }

    /// Column one past the last cell of the run
    #[inline]
    pub fn right_edge(&self) -> i32 {
        self.x + self.width
    }

    /// Check if the cell is part of this run
    pub fn contains(&self, gx: i32, gy: i32) -> bool {
        self.y == gy && self.x <= gx && gx < self.right_edge()
    }

    /// Check if `other` sits directly next to this run on the same row
    pub fn is_adjacent(&self, other: &GroundRun) -> bool {
        self.y == other.y && (self.right_edge() == other.x || other.right_edge() == self.x)
    }
}

/// An enemy spawn at a single cell
///
/// Several enemies may share a cell. `kind` is an opaque identifier that the
/// asset layer maps to a sprite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type", default = "default_enemy_kind")]
    pub kind: String,
}

impl Enemy {
    pub fn new(x: i32, y: i32, kind: impl Into<String>) -> Self {
        Self {
            x,
            y,
            kind: kind.into(),
        }
    }
}

fn default_enemy_kind() -> String {
    DEFAULT_ENEMY_KIND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_contains() {
        let platform = Platform::new(2, 3, 4, 2);
        assert!(platform.contains(2, 3));
        assert!(platform.contains(5, 4));
        assert!(!platform.contains(6, 4));
        assert!(!platform.contains(2, 5));
        assert!(!platform.contains(1, 3));
    }

    #[test]
    fn test_ground_run_adjacency() {
        let run = GroundRun::new(0, 4, 3);
        assert_eq!(run.right_edge(), 3);
        assert!(run.is_adjacent(&GroundRun::new(3, 4, 1)));
        assert!(run.is_adjacent(&GroundRun::new(-2, 4, 2)));
        assert!(!run.is_adjacent(&GroundRun::new(3, 5, 1)));
        assert!(!run.is_adjacent(&GroundRun::new(4, 4, 1)));
    }

    #[test]
    fn test_enemy_wire_name() {
        let enemy = Enemy::new(1, 2, "scientist");
        let json = serde_json::to_value(&enemy).unwrap();
        assert_eq!(json["type"], "scientist");

        let parsed: Enemy = serde_json::from_str(r#"{"x": 4, "y": 5}"#).unwrap();
        assert_eq!(parsed.kind, DEFAULT_ENEMY_KIND);
    }
}
