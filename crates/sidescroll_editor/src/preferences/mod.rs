//! User preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::tools::ToolKind;

/// Maximum number of entries kept in the recent levels list
pub const MAX_RECENT_LEVELS: usize = 10;

/// Editor preferences stored as `preferences.json` in the OS config directory
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    pub show_grid: bool,
    /// Keyboard pan distance in pixels
    pub pan_step: i32,
    pub default_enemy_kind: String,
    pub default_tool: ToolKind,
    /// Open the most recent level on startup
    pub auto_open_last_level: bool,
    /// Level names, most recent first
    pub recent_levels: Vec<String>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            show_grid: true,
            pan_step: sidescroll_core::DEFAULT_PAN_STEP,
            default_enemy_kind: sidescroll_core::DEFAULT_ENEMY_KIND.to_string(),
            default_tool: ToolKind::default(),
            auto_open_last_level: false,
            recent_levels: Vec::new(),
        }
    }
}

impl EditorPreferences {
    pub fn add_recent_level(&mut self, name: &str) {
        push_recent_level(&mut self.recent_levels, name);
    }

    /// Forget a level, e.g. one whose file has been deleted
    pub fn remove_recent_level(&mut self, name: &str) {
        self.recent_levels.retain(|recent| recent != name);
    }

    pub fn last_level(&self) -> Option<&str> {
        self.recent_levels.first().map(String::as_str)
    }
}

/// Move `name` to the front of a recent list, capped at `MAX_RECENT_LEVELS`
pub fn push_recent_level(recent: &mut Vec<String>, name: &str) {
    recent.retain(|existing| existing != name);
    recent.insert(0, name.to_string());
    recent.truncate(MAX_RECENT_LEVELS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_levels_most_recent_first() {
        let mut prefs = EditorPreferences::default();
        prefs.add_recent_level("a.json");
        prefs.add_recent_level("b.json");
        prefs.add_recent_level("a.json");
        assert_eq!(prefs.recent_levels, vec!["a.json", "b.json"]);
        assert_eq!(prefs.last_level(), Some("a.json"));

        prefs.remove_recent_level("a.json");
        assert_eq!(prefs.last_level(), Some("b.json"));
        prefs.remove_recent_level("b.json");
        assert_eq!(prefs.last_level(), None);
    }

    #[test]
    fn test_recent_levels_are_capped() {
        let mut prefs = EditorPreferences::default();
        for i in 0..15 {
            prefs.add_recent_level(&format!("level{}.json", i));
        }
        assert_eq!(prefs.recent_levels.len(), MAX_RECENT_LEVELS);
        assert_eq!(prefs.last_level(), Some("level14.json"));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let prefs: EditorPreferences =
            serde_json::from_str(r#"{"show_grid": false, "default_tool": "Ground"}"#).unwrap();
        assert!(!prefs.show_grid);
        assert_eq!(prefs.default_tool, ToolKind::Ground);
        assert_eq!(prefs.pan_step, sidescroll_core::DEFAULT_PAN_STEP);
        assert_eq!(prefs.default_enemy_kind, "armadillo");
    }
}
