//! Editor commands triggered from the keyboard

mod shortcuts;

pub use shortcuts::{action_for_key, handle_keyboard_shortcuts};

use crate::app_state::AppState;
use crate::tools::ToolKind;

/// Cell size change applied by one `[` / `]` press
pub const CELL_SIZE_STEP: i32 = 8;

/// A discrete editor command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    SelectTool(ToolKind),
    PanLeft,
    PanRight,
    ResetCamera,
    ToggleGrid,
    /// Change the cell size by this many pixels
    StepCellSize(i32),
    /// Select the next enemy kind known to the level
    NextEnemyKind,
    /// Step the background parallax rate through the preset options
    CycleBgScrollRate,
    /// Save to the current level name
    Save,
    /// Load the most recently used level
    OpenRecent,
    /// Replace the level with a new default one and start editing
    NewLevel,
    RequestState(AppState),
}
