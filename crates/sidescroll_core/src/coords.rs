//! Screen, world and grid coordinate conversions
//!
//! Screen space is the window in pixels with a UI band of `panel_height`
//! pixels at the top. World space is level pixels, scrolled horizontally by
//! the camera offset. Grid space is cells of `cell_size` pixels.
//!
//! Grid conversions use floor division, so pixels left of or above the level
//! origin map to negative cells.

/// Convert a screen position to the world pixel under it
#[inline]
pub fn screen_to_world(sx: i32, sy: i32, offset_x: i32, panel_height: i32) -> (i32, i32) {
    (sx.saturating_add(offset_x), sy.saturating_sub(panel_height))
}

/// Convert a world pixel to the cell containing it
#[inline]
pub fn world_to_grid(wx: i32, wy: i32, cell_size: i32) -> (i32, i32) {
    (wx.div_euclid(cell_size), wy.div_euclid(cell_size))
}

/// Top-left world pixel of a cell, saturating at the `i32` range
#[inline]
pub fn grid_to_world(gx: i32, gy: i32, cell_size: i32) -> (i32, i32) {
    (gx.saturating_mul(cell_size), gy.saturating_mul(cell_size))
}

/// Convert a screen position to the cell under it
pub fn screen_to_grid(
    sx: i32,
    sy: i32,
    offset_x: i32,
    panel_height: i32,
    cell_size: i32,
) -> (i32, i32) {
    let (wx, wy) = screen_to_world(sx, sy, offset_x, panel_height);
    world_to_grid(wx, wy, cell_size)
}

/// Top-left screen position of a cell
pub fn grid_to_screen(
    gx: i32,
    gy: i32,
    offset_x: i32,
    panel_height: i32,
    cell_size: i32,
) -> (i32, i32) {
    let (wx, wy) = grid_to_world(gx, gy, cell_size);
    (wx.saturating_sub(offset_x), wy.saturating_add(panel_height))
}

/// Snapshot of everything needed to map pointer positions onto the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTransform {
    /// Cell size in pixels (always at least 1)
    pub cell_size: i32,
    /// Camera horizontal scroll in pixels
    pub offset_x: i32,
    /// Height of the UI band at the top of the viewport
    pub panel_height: i32,
}

impl ViewTransform {
    pub fn new(cell_size: u32, offset_x: i32, panel_height: i32) -> Self {
        Self {
            cell_size: cell_size.max(1).min(i32::MAX as u32) as i32,
            offset_x,
            panel_height,
        }
    }

    /// Check if a screen row is inside the UI band
    #[inline]
    pub fn in_panel(&self, sy: i32) -> bool {
        sy < self.panel_height
    }

    /// Cell under a screen position, or `None` inside the UI band
    pub fn cell_at(&self, sx: i32, sy: i32) -> Option<(i32, i32)> {
        if self.in_panel(sy) {
            return None;
        }
        Some(self.screen_to_grid(sx, sy))
    }

    pub fn screen_to_grid(&self, sx: i32, sy: i32) -> (i32, i32) {
        screen_to_grid(sx, sy, self.offset_x, self.panel_height, self.cell_size)
    }

    pub fn grid_to_screen(&self, gx: i32, gy: i32) -> (i32, i32) {
        grid_to_screen(gx, gy, self.offset_x, self.panel_height, self.cell_size)
    }
}
