//! Level scene model: dimensions plus platforms, ground runs and enemies

use crate::{Enemy, GroundRun, LevelAssets, Platform};

/// Cell size used by new levels, in pixels
pub const DEFAULT_CELL_SIZE: u32 = 32;
/// Width of a new level, in cells
pub const DEFAULT_LEVEL_WIDTH: u32 = 64;
/// Height of a new level, in cells
pub const DEFAULT_LEVEL_HEIGHT: u32 = 16;
/// Smallest cell size accepted by `Level::set_cell_size`
pub const MIN_CELL_SIZE: u32 = 8;
/// Largest cell size accepted by `Level::set_cell_size`
pub const MAX_CELL_SIZE: u32 = 64;

/// Foreground layer scrolls with the camera
pub const DEFAULT_FG_SCROLL_RATE: f32 = 1.0;
pub const DEFAULT_BG_SCROLL_RATE: f32 = 0.2;
/// Background scroll rates the editor steps through
pub const BG_SCROLL_RATE_OPTIONS: [f32; 9] = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];

/// Parallax multipliers applied to the camera offset when drawing layers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parallax {
    pub fg_scroll_rate: f32,
    pub bg_scroll_rate: f32,
}

impl Default for Parallax {
    fn default() -> Self {
        Self {
            fg_scroll_rate: DEFAULT_FG_SCROLL_RATE,
            bg_scroll_rate: DEFAULT_BG_SCROLL_RATE,
        }
    }
}

impl Parallax {
    /// Move the background rate to the next entry of `BG_SCROLL_RATE_OPTIONS`,
    /// wrapping back to the slowest. Returns the new rate.
    pub fn cycle_bg_scroll_rate(&mut self) -> f32 {
        let next = BG_SCROLL_RATE_OPTIONS
            .iter()
            .copied()
            .find(|rate| *rate > self.bg_scroll_rate + 1e-4)
            .unwrap_or(BG_SCROLL_RATE_OPTIONS[0]);
        self.bg_scroll_rate = next;
        next
    }
}

/// A level: grid dimensions and the elements placed on it
///
/// `add_ground` never makes two runs of a row overlap, and no run ever has a
/// width below 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    width: u32,
    height: u32,
    cell_size: u32,
    platforms: Vec<Platform>,
    ground_runs: Vec<GroundRun>,
    enemies: Vec<Enemy>,
    pub assets: LevelAssets,
    pub parallax: Parallax,
}

impl Default for Level {
    fn default() -> Self {
        Self::new()
    }
}

impl Level {
    /// Create an empty level with the default dimensions
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_LEVEL_WIDTH, DEFAULT_LEVEL_HEIGHT, DEFAULT_CELL_SIZE)
    }

    /// Create an empty level with the given dimensions
    ///
    /// Every value is clamped to at least 1. The 8-64 cell size bounds are
    /// only enforced by `set_cell_size`.
    pub fn with_dimensions(width: u32, height: u32, cell_size: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            cell_size: cell_size.max(1),
            platforms: Vec::new(),
            ground_runs: Vec::new(),
            enemies: Vec::new(),
            assets: LevelAssets::default(),
            parallax: Parallax::default(),
        }
    }

    /// Width in cells
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Level width in pixels. Computed in `u64` so any cell count and cell size fit.
    pub fn width_pixels(&self) -> u64 {
        self.width as u64 * self.cell_size as u64
    }

    pub fn height_pixels(&self) -> u64 {
        self.height as u64 * self.cell_size as u64
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    pub fn ground_runs(&self) -> &[GroundRun] {
        &self.ground_runs
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Check if a cell lies within `[0, width) x [0, height)`
    pub fn contains_cell(&self, gx: i32, gy: i32) -> bool {
        gx >= 0 && gy >= 0 && (gx as i64) < self.width as i64 && (gy as i64) < self.height as i64
    }

    /// Clamp a cell into the level bounds
    pub fn clamp_cell(&self, gx: i32, gy: i32) -> (i32, i32) {
        let max_x = (self.width as i64 - 1).min(i32::MAX as i64) as i32;
        let max_y = (self.height as i64 - 1).min(i32::MAX as i64) as i32;
        (gx.clamp(0, max_x), gy.clamp(0, max_y))
    }

    /// Change the level size in cells
    ///
    /// Existing elements are left untouched even if they now fall outside.
    pub fn resize(&mut self, width: i32, height: i32) {
        self.width = width.max(1) as u32;
        self.height = height.max(1) as u32;
    }

    /// Change the cell size, clamped into `[MIN_CELL_SIZE, MAX_CELL_SIZE]`
    ///
    /// Element coordinates are in cells and are not rescaled.
    pub fn set_cell_size(&mut self, size: i32) {
        self.cell_size = size.clamp(MIN_CELL_SIZE as i32, MAX_CELL_SIZE as i32) as u32;
    }

    /// Append a platform. No overlap check, no merge.
    pub fn add_platform(&mut self, x: i32, y: i32, width: i32, height: i32) {
        if width < 1 || height < 1 {
            return;
        }
        self.platforms.push(Platform::new(x, y, width, height));
    }

    /// Add `width` ground cells on row `y` starting at column `x`
    ///
    /// Cells already covered by a run on the row are skipped, so runs never
    /// overlap. Each uncovered piece is merged into the first run of the row
    /// (insertion order) that ends where it starts or starts where it ends.
    /// Only one neighbour is merged per piece; see `compact_ground` for a full
    /// merge. Returns true if any cell became ground.
    pub fn add_ground(&mut self, x: i32, y: i32, width: i32) -> bool {
        if width < 1 {
            return false;
        }

        let pieces = self.uncovered_pieces(x, y, x.saturating_add(width));
        for piece in &pieces {
            self.merge_ground(*piece);
        }
        !pieces.is_empty()
    }

    /// Parts of `[start, end)` on row `y` not covered by any run
    fn uncovered_pieces(&self, start: i32, y: i32, end: i32) -> Vec<GroundRun> {
        let mut covered: Vec<(i32, i32)> = self
            .ground_runs
            .iter()
            .filter(|run| run.y == y && run.x < end && run.right_edge() > start)
            .map(|run| (run.x, run.right_edge()))
            .collect();
        covered.sort_unstable();

        let mut pieces = Vec::new();
        let mut cursor = start;
        for (run_start, run_end) in covered {
            if run_start > cursor {
                pieces.push(GroundRun::new(cursor, y, run_start - cursor));
            }
            cursor = cursor.max(run_end);
            if cursor >= end {
                return pieces;
            }
        }
        if cursor < end {
            pieces.push(GroundRun::new(cursor, y, end - cursor));
        }
        pieces
    }

    fn merge_ground(&mut self, segment: GroundRun) {
        match self
            .ground_runs
            .iter_mut()
            .find(|run| run.is_adjacent(&segment))
        {
            Some(run) => {
                run.x = run.x.min(segment.x);
                run.width += segment.width;
            }
            None => self.ground_runs.push(segment),
        }
    }

    /// Append an enemy and register its kind with the asset references
    pub fn add_enemy(&mut self, x: i32, y: i32, kind: &str) {
        self.assets.register_enemy_kind(kind);
        self.enemies.push(Enemy::new(x, y, kind));
    }

    /// Remove everything occupying a cell
    ///
    /// Platforms containing the cell and enemies on the cell are removed.
    /// Ground runs lose the cell: an interior hit splits the run in two, an
    /// edge hit shrinks it, and a single-cell run disappears.
    /// Returns true if anything changed.
    pub fn delete_at(&mut self, gx: i32, gy: i32) -> bool {
        let platforms_before = self.platforms.len();
        self.platforms.retain(|p| !p.contains(gx, gy));
        let mut changed = self.platforms.len() != platforms_before;

        let mut runs = Vec::with_capacity(self.ground_runs.len() + 1);
        for run in self.ground_runs.drain(..) {
            if !run.contains(gx, gy) {
                runs.push(run);
                continue;
            }
            changed = true;

            let left_width = gx - run.x;
            let right_width = run.right_edge() - (gx + 1);
            if left_width > 0 {
                runs.push(GroundRun::new(run.x, run.y, left_width));
            }
            if right_width > 0 {
                runs.push(GroundRun::new(gx + 1, run.y, right_width));
            }
        }
        self.ground_runs = runs;

        let enemies_before = self.enemies.len();
        self.enemies.retain(|e| !(e.x == gx && e.y == gy));
        changed |= self.enemies.len() != enemies_before;

        changed
    }

    /// Merge every pair of adjacent ground runs, row by row
    ///
    /// Returns the number of runs removed by merging.
    pub fn compact_ground(&mut self) -> usize {
        let before = self.ground_runs.len();
        let mut sorted = std::mem::take(&mut self.ground_runs);
        sorted.sort_by_key(|run| (run.y, run.x));

        let mut merged: Vec<GroundRun> = Vec::with_capacity(sorted.len());
        for run in sorted {
            match merged.last_mut() {
                Some(last) if last.y == run.y && last.right_edge() >= run.x => {
                    let right = last.right_edge().max(run.right_edge());
                    last.width = right - last.x;
                }
                _ => merged.push(run),
            }
        }

        self.ground_runs = merged;
        before - self.ground_runs.len()
    }

    /// Remove all platforms, ground and enemies. Dimensions are kept.
    pub fn clear(&mut self) {
        self.platforms.clear();
        self.ground_runs.clear();
        self.enemies.clear();
    }

    /// Check if no elements have been placed
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty() && self.ground_runs.is_empty() && self.enemies.is_empty()
    }

    /// Restore collections from a decoded document, dropping degenerate records
    pub(crate) fn restore_elements(
        &mut self,
        platforms: Vec<Platform>,
        ground_runs: Vec<GroundRun>,
        enemies: Vec<Enemy>,
    ) {
        self.platforms = platforms
            .into_iter()
            .filter(|p| p.width >= 1 && p.height >= 1)
            .collect();
        self.ground_runs = ground_runs.into_iter().filter(|g| g.width >= 1).collect();
        for enemy in &enemies {
            self.assets.register_enemy_kind(&enemy.kind);
        }
        self.enemies = enemies;
    }
}
