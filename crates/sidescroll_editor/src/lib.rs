//! sidescroll_editor - Level editor for side-scrolling platformer levels
//!
//! This crate provides the editing engine and a minimal bevy shell:
//! - Platform, ground, enemy and eraser tools driven by pointer events
//! - Horizontal camera with keyboard pan and middle-button drag
//! - Level files saved to / loaded from a levels directory
//! - Welcome / editing / exiting application states
//! - Persisted user preferences and recent levels
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use sidescroll_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new().with_levels_dir("levels"))
//!         .run();
//! }
//! ```

pub mod app_state;
pub mod commands;
pub mod preferences;
pub mod project;
pub mod render;
pub mod tools;

pub use sidescroll_core;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use sidescroll_core::{Level, ViewTransform};
use std::path::{Path, PathBuf};
use std::time::Instant;

use app_state::{AppState, AppStateMachine};
use commands::{handle_keyboard_shortcuts, EditorAction};
use preferences::EditorPreferences;
use project::{LevelFileError, LevelStore};
use render::EditorRenderPlugin;
use tools::{
    EditorToolsPlugin, PointerButton, PointerEvent, PointerEventKind, PreviewDescriptor,
    ToolKind, ToolManager,
};

/// Name used for saving until a level is saved or loaded under another name
pub const DEFAULT_LEVEL_NAME: &str = "level1";

/// Editor configuration
///
/// Defaults match a 1024x576 window with a 64px tool panel along the top.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Height of the UI band at the top of the window; excluded from editing
    pub panel_height: i32,
    /// Keyboard pan distance in pixels
    pub pan_step: i32,
    pub levels_dir: PathBuf,
    pub default_enemy_kind: String,
    /// Size of new levels in cells
    pub level_width: u32,
    pub level_height: u32,
    pub cell_size: u32,
    pub initial_tool: ToolKind,
    pub show_grid: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 576,
            panel_height: 64,
            pan_step: sidescroll_core::DEFAULT_PAN_STEP,
            levels_dir: PathBuf::from("levels"),
            default_enemy_kind: sidescroll_core::DEFAULT_ENEMY_KIND.to_string(),
            level_width: sidescroll_core::DEFAULT_LEVEL_WIDTH,
            level_height: sidescroll_core::DEFAULT_LEVEL_HEIGHT,
            cell_size: sidescroll_core::DEFAULT_CELL_SIZE,
            initial_tool: ToolKind::default(),
            show_grid: true,
        }
    }
}

impl EditorConfig {
    /// Take the user's saved defaults
    pub fn apply_preferences(&mut self, preferences: &EditorPreferences) {
        self.show_grid = preferences.show_grid;
        self.pan_step = preferences.pan_step;
        self.default_enemy_kind = preferences.default_enemy_kind.clone();
        self.initial_tool = preferences.default_tool;
    }
}

/// Parameters for creating a new level
#[derive(Clone, Debug, PartialEq)]
pub struct NewLevelRequest {
    /// Width in cells (clamped to at least 1)
    pub width: i32,
    /// Height in cells (clamped to at least 1)
    pub height: i32,
    /// Cell size in pixels (clamped to at least 1)
    pub cell_size: i32,
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub bg_scroll_rate: f32,
}

impl Default for NewLevelRequest {
    fn default() -> Self {
        Self {
            width: sidescroll_core::DEFAULT_LEVEL_WIDTH as i32,
            height: sidescroll_core::DEFAULT_LEVEL_HEIGHT as i32,
            cell_size: sidescroll_core::DEFAULT_CELL_SIZE as i32,
            background: None,
            foreground: None,
            bg_scroll_rate: sidescroll_core::DEFAULT_BG_SCROLL_RATE,
        }
    }
}

impl NewLevelRequest {
    /// Default request sized by the editor configuration
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            width: config.level_width.min(i32::MAX as u32) as i32,
            height: config.level_height.min(i32::MAX as u32) as i32,
            cell_size: config.cell_size.min(i32::MAX as u32) as i32,
            ..Self::default()
        }
    }

    /// Build the empty level described by this request
    pub fn build(&self) -> Level {
        let mut level = Level::with_dimensions(
            self.width.max(1) as u32,
            self.height.max(1) as u32,
            self.cell_size.max(1) as u32,
        );
        level.assets.bg_path = self.background.clone();
        level.assets.fg_path = self.foreground.clone();
        level.parallax.fg_scroll_rate = sidescroll_core::DEFAULT_FG_SCROLL_RATE;
        level.parallax.bg_scroll_rate = self.bg_scroll_rate;
        level
    }
}

/// Everything one editing session works on
///
/// Inserted as a resource by `EditorPlugin`; systems receive it explicitly.
#[derive(Resource)]
pub struct EditorContext {
    pub level: Level,
    pub camera: sidescroll_core::Camera,
    pub tools: ToolManager,
    pub app_state: AppStateMachine,
    pub store: LevelStore,
    pub show_grid: bool,
    /// Name the level is saved under
    pub level_name: String,
    /// Viewport width in pixels, refreshed from the window every frame
    pub viewport_width: u32,
    /// Level file names, most recent first
    pub recent_levels: Vec<String>,
    /// Level saved or loaded since the preferences were last updated
    pub pending_add_recent_level: Option<String>,
    pub config: EditorConfig,
    started_at: Instant,
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorContext {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            level: Level::with_dimensions(config.level_width, config.level_height, config.cell_size),
            camera: sidescroll_core::Camera::new(config.pan_step),
            tools: ToolManager::new(config.initial_tool, config.default_enemy_kind.clone()),
            app_state: AppStateMachine::default(),
            store: LevelStore::new(config.levels_dir.clone()),
            show_grid: config.show_grid,
            level_name: DEFAULT_LEVEL_NAME.to_string(),
            viewport_width: config.window_width,
            recent_levels: Vec::new(),
            pending_add_recent_level: None,
            config,
            started_at: Instant::now(),
        }
    }

    /// Milliseconds since the session started, written into saved files
    pub fn ticks(&self) -> u64 {
        self.started_at.elapsed().as_millis() as u64
    }

    /// Current screen/grid mapping
    pub fn view(&self) -> ViewTransform {
        ViewTransform::new(
            self.level.cell_size(),
            self.camera.offset_x(),
            self.config.panel_height,
        )
    }

    /// Grid cell under a screen position, `None` inside the UI band
    pub fn hover_cell(&self, position: (i32, i32)) -> Option<(i32, i32)> {
        self.view().cell_at(position.0, position.1)
    }

    /// What the active tool would do at a screen position
    pub fn preview(&self, position: (i32, i32)) -> Option<PreviewDescriptor> {
        if self.app_state.current() != AppState::Editing {
            return None;
        }
        self.tools.preview_for(position, &self.level, &self.view())
    }

    /// Select the enemy kind placed by the enemy tool
    pub fn set_enemy_kind(&mut self, kind: &str) {
        self.tools.set_enemy_kind(kind);
        self.level.assets.register_enemy_kind(kind);
    }

    /// Select the enemy kind after the current one in the level's kind list
    pub fn next_enemy_kind(&mut self) {
        let kinds = &self.level.assets.enemy_kinds;
        if kinds.is_empty() {
            return;
        }
        let next = kinds
            .iter()
            .position(|kind| kind == self.tools.enemy_kind())
            .map_or(0, |index| (index + 1) % kinds.len());
        let kind = kinds[next].clone();
        self.set_enemy_kind(&kind);
        debug!("Enemy kind is now {}", kind);
    }

    /// Route a pointer event. Returns true if the level was mutated.
    ///
    /// Middle-button gestures drag the camera; everything else goes to the
    /// active tool. Events are ignored outside the editing state.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if self.app_state.current() != AppState::Editing {
            return false;
        }

        let x = event.position.0;
        match (event.kind, event.button) {
            (PointerEventKind::Down, Some(PointerButton::Middle)) => {
                self.camera.start_drag(x);
                return false;
            }
            (PointerEventKind::Up, Some(PointerButton::Middle)) => {
                self.camera.end_drag();
                return false;
            }
            (PointerEventKind::Move, _) if self.camera.is_dragging() => {
                self.camera.continue_drag(x);
            }
            _ => {}
        }
        if event.button == Some(PointerButton::Middle) {
            return false;
        }

        let view = self.view();
        self.tools.handle_event(event, &mut self.level, &view)
    }

    /// Replace the level wholesale with a new empty one
    pub fn new_level(&mut self, request: &NewLevelRequest) {
        let mut level = request.build();
        level.assets.register_enemy_kind(self.tools.enemy_kind());
        info!(
            "Created new level: {}x{} cells at {}px",
            level.width(),
            level.height(),
            level.cell_size()
        );
        self.replace_level(level, DEFAULT_LEVEL_NAME.to_string());
    }

    /// Save under the current level name
    pub fn save(&mut self) -> Result<PathBuf, LevelFileError> {
        let name = self.level_name.clone();
        self.save_as(&name)
    }

    /// Save under `name`, which becomes the current level name
    pub fn save_as(&mut self, name: &str) -> Result<PathBuf, LevelFileError> {
        let file_name = LevelStore::file_name(name)?;
        let path = self.store.save(&file_name, &self.level, self.ticks())?;
        info!(
            "Saved level to {:?} ({}x{} cells)",
            path,
            self.level.width(),
            self.level.height()
        );
        self.level_name = file_name.clone();
        self.remember_recent(file_name);
        Ok(path)
    }

    /// Load a level from the store, replacing the current one
    pub fn load(&mut self, name: &str) -> Result<(), LevelFileError> {
        let file_name = LevelStore::file_name(name)?;
        let level = self.store.load(&file_name)?;
        info!(
            "Loaded level '{}' ({}x{} cells, {} platforms, {} ground runs, {} enemies)",
            file_name,
            level.width(),
            level.height(),
            level.platforms().len(),
            level.ground_runs().len(),
            level.enemies().len()
        );
        self.replace_level(level, file_name.clone());
        self.remember_recent(file_name);
        Ok(())
    }

    /// Most recently used level that still exists, else the newest file in the store
    pub fn most_recent_level(&self) -> Option<String> {
        self.recent_levels
            .iter()
            .find(|name| self.store.exists(name))
            .cloned()
            .or_else(|| self.store.latest())
    }

    /// Run a discrete editor command
    pub fn apply_action(&mut self, action: EditorAction) -> Result<(), LevelFileError> {
        match action {
            EditorAction::SelectTool(kind) => {
                self.tools.set_tool(kind);
                debug!("Selected {} tool", kind.label());
            }
            EditorAction::PanLeft => self.camera.pan_left(),
            EditorAction::PanRight => self.camera.pan_right(),
            EditorAction::ResetCamera => self.camera.reset(),
            EditorAction::ToggleGrid => self.show_grid = !self.show_grid,
            EditorAction::StepCellSize(delta) => {
                let size = (self.level.cell_size().min(i32::MAX as u32) as i32).saturating_add(delta);
                self.level.set_cell_size(size);
                debug!("Cell size is now {}px", self.level.cell_size());
            }
            EditorAction::NextEnemyKind => self.next_enemy_kind(),
            EditorAction::CycleBgScrollRate => {
                let rate = self.level.parallax.cycle_bg_scroll_rate();
                debug!("Background scroll rate is now {}", rate);
            }
            EditorAction::Save => {
                self.save()?;
            }
            EditorAction::OpenRecent => {
                let Some(name) = self.most_recent_level() else {
                    warn!("No saved level to open in {:?}", self.store.dir());
                    return Ok(());
                };
                self.load(&name)?;
                self.app_state.request_transition(AppState::Editing);
            }
            EditorAction::NewLevel => {
                let request = NewLevelRequest::from_config(&self.config);
                self.new_level(&request);
                self.app_state.request_transition(AppState::Editing);
            }
            EditorAction::RequestState(state) => self.app_state.request_transition(state),
        }
        Ok(())
    }

    /// Per-frame housekeeping: apply the pending state transition and clamp the camera
    ///
    /// Returns the transition that was applied, if any.
    pub fn frame(&mut self) -> Option<(AppState, AppState)> {
        let transition = self.app_state.apply_pending();
        if let Some((from, to)) = transition {
            info!("State change: {} -> {}", from.label(), to.label());
            if from == AppState::Editing {
                self.tools.abandon_all();
                self.camera.end_drag();
            }
        }
        self.camera
            .update(self.level.width_pixels(), self.viewport_width);
        transition
    }

    fn replace_level(&mut self, level: Level, name: String) {
        self.level = level;
        self.level_name = name;
        self.camera.reset();
        self.camera.end_drag();
        self.tools.abandon_all();
    }

    fn remember_recent(&mut self, file_name: String) {
        preferences::push_recent_level(&mut self.recent_levels, &file_name);
        self.pending_add_recent_level = Some(file_name);
    }
}

/// Main editor plugin with configurable levels directory and initial state
///
/// Builder settings take precedence over saved preferences.
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use sidescroll_editor::{tools::ToolKind, EditorPlugin};
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_levels_dir("my_levels")
///             .with_pan_step(200)
///             .with_initial_tool(ToolKind::Ground)
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Custom levels directory. If None, uses `levels` in the working directory.
    pub levels_dir: Option<PathBuf>,
    pub panel_height: Option<i32>,
    pub pan_step: Option<i32>,
    pub initial_tool: Option<ToolKind>,
    pub show_grid: Option<bool>,
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory level files are saved to and loaded from
    pub fn with_levels_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.levels_dir = Some(path.into());
        self
    }

    /// Set the height of the UI band at the top of the window (default: 64)
    pub fn with_panel_height(mut self, height: i32) -> Self {
        self.panel_height = Some(height.max(0));
        self
    }

    /// Set the keyboard pan distance in pixels (default: 100)
    pub fn with_pan_step(mut self, step: i32) -> Self {
        self.pan_step = Some(step);
        self
    }

    /// Set the initial tool selection (default: Platform)
    pub fn with_initial_tool(mut self, tool: ToolKind) -> Self {
        self.initial_tool = Some(tool);
        self
    }

    /// Set whether to show the grid on startup (default: true)
    pub fn with_initial_grid(mut self, show: bool) -> Self {
        self.show_grid = Some(show);
        self
    }

    /// Merge saved preferences and builder settings into a configuration
    pub fn resolve_config(&self, preferences: &EditorPreferences) -> EditorConfig {
        let mut config = EditorConfig::default();
        config.apply_preferences(preferences);
        if let Some(dir) = &self.levels_dir {
            config.levels_dir = dir.clone();
        }
        if let Some(height) = self.panel_height {
            config.panel_height = height;
        }
        if let Some(step) = self.pan_step {
            config.pan_step = step;
        }
        if let Some(tool) = self.initial_tool {
            config.initial_tool = tool;
        }
        if let Some(show) = self.show_grid {
            config.show_grid = show;
        }
        config
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        // Load user preferences
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        let config = self.resolve_config(&preferences);
        bevy::log::info!(
            "EditorPlugin: Using levels directory: {:?}",
            absolute_or_relative(&config.levels_dir)
        );

        let mut context = EditorContext::new(config);
        context.recent_levels = preferences.recent_levels.clone();

        app.add_plugins(EditorToolsPlugin)
            .add_plugins(EditorRenderPlugin)
            .insert_resource(context)
            .insert_resource(preferences)
            .add_systems(Startup, setup_editor_camera)
            .add_systems(Update, (sync_viewport, handle_keyboard_shortcuts))
            .add_systems(
                PostUpdate,
                (apply_state_transitions, handle_recent_levels).chain(),
            );
    }
}

fn absolute_or_relative(path: &Path) -> PathBuf {
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Keep the camera clamp in step with the window size
fn sync_viewport(windows: Query<&Window>, mut context: ResMut<EditorContext>) {
    let Some(window) = windows.iter().next() else {
        return;
    };
    let width = window.resolution.width().max(0.0) as u32;
    if context.viewport_width != width {
        context.viewport_width = width;
    }
}

/// Apply the pending state transition once per frame; exit the app when asked
pub fn apply_state_transitions(
    mut context: ResMut<EditorContext>,
    mut exit: MessageWriter<AppExit>,
) {
    if context.frame().is_some() && context.app_state.is_exiting() {
        exit.write(AppExit::Success);
    }
}

/// System to handle recent levels updates
fn handle_recent_levels(
    mut context: ResMut<EditorContext>,
    mut preferences: ResMut<EditorPreferences>,
) {
    let Some(name) = context.pending_add_recent_level.take() else {
        return;
    };
    preferences.add_recent_level(&name);
    if let Err(e) = preferences.save() {
        bevy::log::error!("Failed to save preferences: {}", e);
    }
}
