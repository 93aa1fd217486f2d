//! Asset references stored with a level
//!
//! The core never decodes image bytes. It keeps paths and enemy kind
//! identifiers that the asset loader resolves.

/// Path segment that asset paths are stored relative to
pub const RESOURCES_MARKER: &str = "resources";

/// Platform sprite referenced by every level
pub const DEFAULT_PLATFORM_IMAGE: &str = "resources/graphics/platform.png";

/// Parallax artwork shipped with early levels that later moved into `backgrounds/`
const LEGACY_LAYER_IMAGES: [&str; 2] = ["background_2048_512.png", "foreground_2048_512.png"];
const LEGACY_LAYER_DIR: &str = "resources/graphics/backgrounds";

/// Asset paths and identifiers owned by a level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAssets {
    /// Background layer image
    pub bg_path: Option<String>,
    /// Foreground layer image
    pub fg_path: Option<String>,
    /// Platform tile image
    pub platform_image: String,
    /// Every distinct enemy kind requested, in first-seen order
    pub enemy_kinds: Vec<String>,
}

impl Default for LevelAssets {
    fn default() -> Self {
        Self {
            bg_path: None,
            fg_path: None,
            platform_image: DEFAULT_PLATFORM_IMAGE.to_string(),
            enemy_kinds: Vec::new(),
        }
    }
}

impl LevelAssets {
    /// Record an enemy kind so the asset layer can load its sprite
    ///
    /// Returns true if the kind was not known yet.
    pub fn register_enemy_kind(&mut self, kind: &str) -> bool {
        if self.enemy_kinds.iter().any(|k| k == kind) {
            return false;
        }
        self.enemy_kinds.push(kind.to_string());
        true
    }
}

/// Make an asset path portable by cutting everything before the `resources` segment.
///
/// Backslashes are normalized to forward slashes. Paths without a `resources`
/// segment are returned unchanged.
pub fn normalize_asset_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let segments: Vec<&str> = normalized.split('/').collect();
    match segments.iter().position(|s| *s == RESOURCES_MARKER) {
        Some(index) => segments[index..].join("/"),
        None => path.to_string(),
    }
}

/// Point old parallax artwork paths at their current directory.
pub fn migrate_legacy_asset_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    if normalized.contains("backgrounds") {
        return path.to_string();
    }
    let file_name = normalized.rsplit('/').next().unwrap_or_default();
    match LEGACY_LAYER_IMAGES.iter().find(|image| **image == file_name) {
        Some(image) => format!("{}/{}", LEGACY_LAYER_DIR, image),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_absolute_unix_path() {
        assert_eq!(
            normalize_asset_path("/home/dev/game/resources/graphics/bg.png"),
            "resources/graphics/bg.png"
        );
    }

    #[test]
    fn test_normalize_windows_path() {
        assert_eq!(
            normalize_asset_path(r"C:\Users\dev\game\resources\graphics\fg.png"),
            "resources/graphics/fg.png"
        );
    }

    #[test]
    fn test_normalize_without_marker_is_unchanged() {
        assert_eq!(
            normalize_asset_path("/opt/art/sky.png"),
            "/opt/art/sky.png"
        );
        // A segment that merely contains the marker does not count
        assert_eq!(
            normalize_asset_path("/opt/myresources/sky.png"),
            "/opt/myresources/sky.png"
        );
    }

    #[test]
    fn test_migrate_legacy_layer_image() {
        assert_eq!(
            migrate_legacy_asset_path("resources/graphics/background_2048_512.png"),
            "resources/graphics/backgrounds/background_2048_512.png"
        );
        assert_eq!(
            migrate_legacy_asset_path("resources/graphics/backgrounds/foreground_2048_512.png"),
            "resources/graphics/backgrounds/foreground_2048_512.png"
        );
        assert_eq!(
            migrate_legacy_asset_path("resources/graphics/cave.png"),
            "resources/graphics/cave.png"
        );
    }

    #[test]
    fn test_register_enemy_kind_keeps_first_seen_order() {
        let mut assets = LevelAssets::default();
        assert!(assets.register_enemy_kind("scientist"));
        assert!(assets.register_enemy_kind("armadillo"));
        assert!(!assets.register_enemy_kind("scientist"));
        assert_eq!(assets.enemy_kinds, vec!["scientist", "armadillo"]);
    }
}
