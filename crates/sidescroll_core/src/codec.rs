//! Level file format
//!
//! A level is stored as a single JSON object:
//!
//! ```json
//! {
//!   "dimensions": { "width": 64, "height": 16, "cell_size": 32,
//!                   "width_pixels": 2048, "height_pixels": 512 },
//!   "platforms": [ { "x": 4, "y": 10, "width": 3, "height": 1 } ],
//!   "ground_blocks": [ { "x": 0, "y": 15, "width": 64 } ],
//!   "enemies": [ { "x": 12, "y": 14, "type": "armadillo" } ],
//!   "assets": { "background": "resources/graphics/backgrounds/bg.png",
//!               "foreground": "resources/graphics/backgrounds/fg.png",
//!               "platform_image": "resources/graphics/platform.png",
//!               "enemy_types": ["armadillo"] },
//!   "parallax": { "fg_scroll_rate": 1.0, "bg_scroll_rate": 0.2 },
//!   "metadata": { "created": 5230, "editor_version": "1.0" }
//! }
//! ```
//!
//! Every section is optional when decoding. Older files keep the layer
//! images in top-level `bg_path` / `fg_path` fields instead of `assets`.

use crate::{
    migrate_legacy_asset_path, normalize_asset_path, Enemy, GroundRun, Level, Platform,
    DEFAULT_BG_SCROLL_RATE, DEFAULT_CELL_SIZE, DEFAULT_FG_SCROLL_RATE, DEFAULT_LEVEL_HEIGHT,
    DEFAULT_LEVEL_WIDTH, DEFAULT_PLATFORM_IMAGE,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Version string written into `metadata.editor_version`
pub const EDITOR_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Input is not valid JSON
    Json(String),
    /// The document root is not a JSON object
    NotAnObject,
    /// A field is present but has the wrong shape
    InvalidField { field: &'static str, message: String },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Json(e) => write!(f, "Invalid JSON: {}", e),
            DecodeError::NotAnObject => write!(f, "Level document is not a JSON object"),
            DecodeError::InvalidField { field, message } => {
                write!(f, "Invalid '{}' field: {}", field, message)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Level size section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionsSection {
    #[serde(default = "default_width")]
    pub width: i64,
    #[serde(default = "default_height")]
    pub height: i64,
    #[serde(default = "default_cell_size")]
    pub cell_size: i64,
    /// Derived on load; written for consumers that do not multiply
    #[serde(default)]
    pub width_pixels: i64,
    #[serde(default)]
    pub height_pixels: i64,
}

impl Default for DimensionsSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            cell_size: default_cell_size(),
            width_pixels: 0,
            height_pixels: 0,
        }
    }
}

/// Asset references section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetSection {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub platform_image: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enemy_types: Vec<String>,
}

/// Layer scroll rates section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxSection {
    #[serde(default = "default_fg_scroll_rate")]
    pub fg_scroll_rate: f32,
    #[serde(default = "default_bg_scroll_rate")]
    pub bg_scroll_rate: f32,
}

impl Default for ParallaxSection {
    fn default() -> Self {
        Self {
            fg_scroll_rate: DEFAULT_FG_SCROLL_RATE,
            bg_scroll_rate: DEFAULT_BG_SCROLL_RATE,
        }
    }
}

/// Bookkeeping section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSection {
    /// Editor tick (milliseconds since start) at save time
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub editor_version: Option<String>,
}

/// The complete level document, section by section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDocument {
    pub dimensions: DimensionsSection,
    pub platforms: Vec<Platform>,
    pub ground_blocks: Vec<GroundRun>,
    pub enemies: Vec<Enemy>,
    pub assets: AssetSection,
    pub parallax: ParallaxSection,
    pub metadata: MetadataSection,
    /// Legacy flat background path, read but never written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_path: Option<String>,
    /// Legacy flat foreground path, read but never written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fg_path: Option<String>,
}

impl LevelDocument {
    /// Capture a level, storing asset paths relative to `resources/`
    pub fn from_level(level: &Level, created_at_tick: u64) -> Self {
        let assets = &level.assets;
        Self {
            dimensions: DimensionsSection {
                width: level.width() as i64,
                height: level.height() as i64,
                cell_size: level.cell_size() as i64,
                width_pixels: i64::try_from(level.width_pixels()).unwrap_or(i64::MAX),
                height_pixels: i64::try_from(level.height_pixels()).unwrap_or(i64::MAX),
            },
            platforms: level.platforms().to_vec(),
            ground_blocks: level.ground_runs().to_vec(),
            enemies: level.enemies().to_vec(),
            assets: AssetSection {
                background: assets.bg_path.as_deref().map(normalize_asset_path),
                foreground: assets.fg_path.as_deref().map(normalize_asset_path),
                platform_image: Some(normalize_asset_path(&assets.platform_image)),
                enemy_types: assets.enemy_kinds.clone(),
            },
            parallax: ParallaxSection {
                fg_scroll_rate: level.parallax.fg_scroll_rate,
                bg_scroll_rate: level.parallax.bg_scroll_rate,
            },
            metadata: MetadataSection {
                created: created_at_tick,
                editor_version: Some(EDITOR_VERSION.to_string()),
            },
            bg_path: None,
            fg_path: None,
        }
    }

    /// Read a document, filling in defaults for anything missing or null
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let root = value.as_object().ok_or(DecodeError::NotAnObject)?;
        Ok(Self {
            dimensions: section(root, "dimensions")?.unwrap_or_default(),
            platforms: section(root, "platforms")?.unwrap_or_default(),
            ground_blocks: section(root, "ground_blocks")?.unwrap_or_default(),
            enemies: section(root, "enemies")?.unwrap_or_default(),
            assets: section(root, "assets")?.unwrap_or_default(),
            parallax: section(root, "parallax")?.unwrap_or_default(),
            metadata: section(root, "metadata")?.unwrap_or_default(),
            bg_path: section(root, "bg_path")?,
            fg_path: section(root, "fg_path")?,
        })
    }

    /// Build the level described by this document
    pub fn into_level(self) -> Level {
        let dims = &self.dimensions;
        let mut level = Level::with_dimensions(
            clamp_dimension(dims.width),
            clamp_dimension(dims.height),
            clamp_dimension(dims.cell_size),
        );

        level.assets.bg_path = self
            .assets
            .background
            .or_else(|| self.bg_path.as_deref().map(normalize_asset_path))
            .map(|path| migrate_legacy_asset_path(&path));
        level.assets.fg_path = self
            .assets
            .foreground
            .or_else(|| self.fg_path.as_deref().map(normalize_asset_path))
            .map(|path| migrate_legacy_asset_path(&path));
        level.assets.platform_image = self
            .assets
            .platform_image
            .unwrap_or_else(|| DEFAULT_PLATFORM_IMAGE.to_string());
        for kind in &self.assets.enemy_types {
            level.assets.register_enemy_kind(kind);
        }

        level.parallax.fg_scroll_rate = self.parallax.fg_scroll_rate;
        level.parallax.bg_scroll_rate = self.parallax.bg_scroll_rate;

        level.restore_elements(self.platforms, self.ground_blocks, self.enemies);
        level
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Encode a level into its document form
pub fn encode(level: &Level, created_at_tick: u64) -> LevelDocument {
    LevelDocument::from_level(level, created_at_tick)
}

/// Decode a level from a parsed JSON document
pub fn decode(value: &Value) -> Result<Level, DecodeError> {
    LevelDocument::from_value(value).map(LevelDocument::into_level)
}

/// Decode a level from JSON text
pub fn decode_str(text: &str) -> Result<Level, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))?;
    decode(&value)
}

/// Deserialize one top-level field, treating absent and null alike
fn section<T: DeserializeOwned>(
    root: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<T>, DecodeError> {
    match root.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => T::deserialize(value)
            .map(Some)
            .map_err(|e| DecodeError::InvalidField {
                field,
                message: e.to_string(),
            }),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(1, u32::MAX as i64) as u32
}

fn default_width() -> i64 {
    DEFAULT_LEVEL_WIDTH as i64
}

fn default_height() -> i64 {
    DEFAULT_LEVEL_HEIGHT as i64
}

fn default_cell_size() -> i64 {
    DEFAULT_CELL_SIZE as i64
}

fn default_fg_scroll_rate() -> f32 {
    DEFAULT_FG_SCROLL_RATE
}

fn default_bg_scroll_rate() -> f32 {
    DEFAULT_BG_SCROLL_RATE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sorted<T: std::fmt::Debug>(items: &[T]) -> Vec<String> {
        let mut items: Vec<String> = items.iter().map(|item| format!("{:?}", item)).collect();
        items.sort();
        items
    }

    fn sample_level() -> Level {
        let mut level = Level::with_dimensions(80, 12, 16);
        level.add_platform(3, 4, 5, 1);
        level.add_platform(10, 2, 2, 3);
        level.add_ground(0, 11, 1);
        level.add_ground(1, 11, 1);
        level.add_ground(6, 11, 4);
        level.add_ground(2, 9, 1);
        level.add_enemy(7, 10, "armadillo");
        level.add_enemy(7, 10, "scientist");
        level.parallax.bg_scroll_rate = 0.4;
        level.assets.bg_path = Some("/home/dev/game/resources/graphics/backgrounds/sky.png".into());
        level.assets.fg_path = Some("art/hills.png".into());
        level
    }

    fn encoded(level: &Level, tick: u64) -> Value {
        serde_json::to_value(encode(level, tick)).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let level = sample_level();
        let value = encoded(&level, 1234);

        assert_eq!(value["dimensions"]["width"], 80);
        assert_eq!(value["dimensions"]["cell_size"], 16);
        assert_eq!(value["dimensions"]["width_pixels"], 1280);
        assert_eq!(value["dimensions"]["height_pixels"], 192);
        assert_eq!(value["ground_blocks"][0], json!({"x": 0, "y": 11, "width": 2}));
        assert_eq!(value["enemies"][1]["type"], "scientist");
        assert_eq!(
            value["assets"]["background"],
            "resources/graphics/backgrounds/sky.png"
        );
        // No resources segment: stored unchanged
        assert_eq!(value["assets"]["foreground"], "art/hills.png");
        assert_eq!(value["assets"]["platform_image"], DEFAULT_PLATFORM_IMAGE);
        assert_eq!(value["assets"]["enemy_types"], json!(["armadillo", "scientist"]));
        assert_eq!(value["metadata"]["created"], 1234);
        assert_eq!(value["metadata"]["editor_version"], EDITOR_VERSION);
        assert!(value.get("bg_path").is_none());
    }

    #[test]
    fn test_round_trip() {
        let level = sample_level();
        let text = encode(&level, 99).to_json_pretty().unwrap();
        let decoded = decode_str(&text).unwrap();

        assert_eq!(decoded.width(), level.width());
        assert_eq!(decoded.height(), level.height());
        assert_eq!(decoded.cell_size(), level.cell_size());
        assert_eq!(decoded.parallax, level.parallax);
        assert_eq!(sorted(decoded.platforms()), sorted(level.platforms()));
        assert_eq!(sorted(decoded.ground_runs()), sorted(level.ground_runs()));
        assert_eq!(sorted(decoded.enemies()), sorted(level.enemies()));
        assert_eq!(decoded.assets.enemy_kinds, level.assets.enemy_kinds);
    }

    #[test]
    fn test_encode_huge_dimensions() {
        let level = decode(&json!({"dimensions": {"width": 100_000_000, "cell_size": 64}})).unwrap();
        let value = encoded(&level, 0);
        assert_eq!(value["dimensions"]["width_pixels"], 6_400_000_000i64);
        assert_eq!(decode(&value).unwrap().width(), 100_000_000);

        let level = Level::with_dimensions(u32::MAX, 1, u32::MAX);
        assert_eq!(encoded(&level, 0)["dimensions"]["width_pixels"], i64::MAX);
    }

    #[test]
    fn test_round_trip_keeps_small_cell_size() {
        let level = Level::with_dimensions(5, 5, 4);
        let decoded = decode(&encoded(&level, 0)).unwrap();
        assert_eq!(decoded.cell_size(), 4);
    }

    #[test]
    fn test_decode_empty_document_uses_defaults() {
        let level = decode(&json!({})).unwrap();
        assert_eq!(level.width(), DEFAULT_LEVEL_WIDTH);
        assert_eq!(level.height(), DEFAULT_LEVEL_HEIGHT);
        assert_eq!(level.cell_size(), DEFAULT_CELL_SIZE);
        assert!(level.is_empty());
        assert_eq!(level.parallax.fg_scroll_rate, 1.0);
        assert_eq!(level.parallax.bg_scroll_rate, 0.2);
        assert_eq!(level.assets.bg_path, None);
        assert_eq!(level.assets.fg_path, None);
        assert_eq!(level.assets.platform_image, DEFAULT_PLATFORM_IMAGE);
    }

    #[test]
    fn test_decode_sparse_sections() {
        let level = decode(&json!({
            "dimensions": {"width": 30},
            "platforms": null,
            "assets": null,
            "parallax": {"bg_scroll_rate": 0.5},
            "enemies": [{"x": 1, "y": 2}]
        }))
        .unwrap();
        assert_eq!(level.width(), 30);
        assert_eq!(level.height(), DEFAULT_LEVEL_HEIGHT);
        assert_eq!(level.parallax.fg_scroll_rate, 1.0);
        assert_eq!(level.parallax.bg_scroll_rate, 0.5);
        assert_eq!(level.enemies()[0].kind, "armadillo");
        assert_eq!(level.assets.enemy_kinds, vec!["armadillo"]);
    }

    #[test]
    fn test_decode_legacy_flat_paths_match_modern() {
        let modern = decode(&json!({
            "assets": {
                "background": "resources/graphics/backgrounds/sky.png",
                "foreground": "resources/graphics/backgrounds/hills.png"
            }
        }))
        .unwrap();
        let legacy = decode(&json!({
            "bg_path": "resources/graphics/backgrounds/sky.png",
            "fg_path": "resources/graphics/backgrounds/hills.png"
        }))
        .unwrap();
        assert_eq!(legacy.assets.bg_path, modern.assets.bg_path);
        assert_eq!(legacy.assets.fg_path, modern.assets.fg_path);
    }

    #[test]
    fn test_decode_legacy_absolute_paths() {
        let level = decode(&json!({
            "bg_path": "C:\\levels\\game\\resources\\graphics\\background_2048_512.png",
            "fg_path": "/srv/game/resources/graphics/foreground_2048_512.png"
        }))
        .unwrap();
        assert_eq!(
            level.assets.bg_path.as_deref(),
            Some("resources/graphics/backgrounds/background_2048_512.png")
        );
        assert_eq!(
            level.assets.fg_path.as_deref(),
            Some("resources/graphics/backgrounds/foreground_2048_512.png")
        );
    }

    #[test]
    fn test_decode_nested_assets_win_over_flat() {
        let level = decode(&json!({
            "assets": {"background": "resources/new.png"},
            "bg_path": "resources/old.png"
        }))
        .unwrap();
        assert_eq!(level.assets.bg_path.as_deref(), Some("resources/new.png"));
    }

    #[test]
    fn test_decode_drops_degenerate_records() {
        let level = decode(&json!({
            "platforms": [{"x": 0, "y": 0, "width": 0, "height": 2}],
            "ground_blocks": [
                {"x": 0, "y": 0, "width": 0},
                {"x": 4, "y": 0, "width": -2},
                {"x": 1, "y": 3, "width": 2}
            ]
        }))
        .unwrap();
        assert!(level.platforms().is_empty());
        assert_eq!(level.ground_runs(), &[GroundRun::new(1, 3, 2)]);
    }

    #[test]
    fn test_decode_clamps_dimensions() {
        let level = decode(&json!({
            "dimensions": {"width": 0, "height": -4, "cell_size": 0}
        }))
        .unwrap();
        assert_eq!((level.width(), level.height(), level.cell_size()), (1, 1, 1));
    }

    #[test]
    fn test_decode_rejects_malformed_sections() {
        assert_eq!(decode(&json!([1, 2])), Err(DecodeError::NotAnObject));

        match decode(&json!({"dimensions": 12})) {
            Err(DecodeError::InvalidField { field, .. }) => assert_eq!(field, "dimensions"),
            other => panic!("expected invalid dimensions, got {:?}", other),
        }
        match decode(&json!({"platforms": {"x": 1}})) {
            Err(DecodeError::InvalidField { field, .. }) => assert_eq!(field, "platforms"),
            other => panic!("expected invalid platforms, got {:?}", other),
        }
        match decode(&json!({"ground_blocks": [1, 2]})) {
            Err(DecodeError::InvalidField { field, .. }) => assert_eq!(field, "ground_blocks"),
            other => panic!("expected invalid ground_blocks, got {:?}", other),
        }
        assert!(matches!(decode_str("{not json"), Err(DecodeError::Json(_))));
    }
}
