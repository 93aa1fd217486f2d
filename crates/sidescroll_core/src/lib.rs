//! Core data structures for the sidescroller level editor
//!
//! This crate provides the engine-free scene model the editor mutates:
//! - `Level` - Level dimensions plus platforms, merged ground runs and enemies
//! - `Platform` / `GroundRun` / `Enemy` - Typed records placed on the grid
//! - `LevelAssets` - Background/foreground/sprite references stored with a level
//! - `Camera` - Horizontal scroll offset clamped to the level bounds
//! - `ViewTransform` - Screen <-> world <-> grid conversions
//! - `LevelDocument` - Versioned JSON level-file format (`encode` / `decode`)

mod assets;
mod camera;
mod codec;
mod coords;
mod entity;
mod level;

pub use assets::{
    migrate_legacy_asset_path, normalize_asset_path, LevelAssets, DEFAULT_PLATFORM_IMAGE,
    RESOURCES_MARKER,
};
pub use camera::{Camera, DEFAULT_PAN_STEP};
pub use codec::{
    decode, decode_str, encode, AssetSection, DecodeError, DimensionsSection, LevelDocument,
    MetadataSection, ParallaxSection, EDITOR_VERSION,
};
pub use coords::{
    grid_to_screen, grid_to_world, screen_to_grid, screen_to_world, world_to_grid, ViewTransform,
};
pub use entity::{Enemy, GroundRun, Platform, DEFAULT_ENEMY_KIND};
pub use level::{
    Level, Parallax, BG_SCROLL_RATE_OPTIONS, DEFAULT_BG_SCROLL_RATE, DEFAULT_CELL_SIZE,
    DEFAULT_FG_SCROLL_RATE, DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH, MAX_CELL_SIZE,
    MIN_CELL_SIZE,
};
