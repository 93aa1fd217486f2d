//! Horizontal scrolling camera
//!
//! The camera keeps a pixel offset into the level. Pan and drag input move
//! it freely; `update` clamps it back into the level once per frame:
//!
//! ```rust
//! use sidescroll_core::Camera;
//!
//! let mut camera = Camera::default();
//! camera.pan(100_000);
//! camera.update(2048, 1024);
//! assert_eq!(camera.offset_x(), 1024);
//! ```

/// Keyboard pan distance in pixels
pub const DEFAULT_PAN_STEP: i32 = 100;

/// Camera scroll state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Camera {
    offset_x: i32,
    /// Vertical scroll is not implemented; always 0
    offset_y: i32,
    /// Pointer x of the last drag event while dragging
    drag_anchor: Option<i32>,
    pan_step: i32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_PAN_STEP)
    }
}

impl Camera {
    /// Create a camera at the level origin with the given keyboard pan step
    pub fn new(pan_step: i32) -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            drag_anchor: None,
            pan_step,
        }
    }

    pub fn offset_x(&self) -> i32 {
        self.offset_x
    }

    pub fn offset_y(&self) -> i32 {
        self.offset_y
    }

    pub fn pan_step(&self) -> i32 {
        self.pan_step
    }

    pub fn set_pan_step(&mut self, pan_step: i32) {
        self.pan_step = pan_step;
    }

    /// Clamp the offset into `[0, max(0, level_width_pixels - viewport_width)]`
    pub fn update(&mut self, level_width_pixels: u64, viewport_width: u32) {
        let max_x = level_width_pixels
            .saturating_sub(viewport_width as u64)
            .min(i32::MAX as u64) as i32;
        self.offset_x = self.offset_x.clamp(0, max_x);
    }

    /// Move by `delta` pixels. Not clamped until the next `update`.
    pub fn pan(&mut self, delta: i32) {
        self.offset_x = self.offset_x.saturating_add(delta);
    }

    /// Move one pan step towards the level start
    pub fn pan_left(&mut self) {
        self.pan(-self.pan_step);
    }

    /// Move one pan step towards the level end
    pub fn pan_right(&mut self) {
        self.pan(self.pan_step);
    }

    /// Begin a grab-and-pull drag at the given pointer x
    pub fn start_drag(&mut self, pointer_x: i32) {
        self.drag_anchor = Some(pointer_x);
    }

    /// Scroll by the pointer movement since the last drag event
    ///
    /// Moving the pointer left scrolls the view right.
    pub fn continue_drag(&mut self, pointer_x: i32) {
        let Some(last_x) = self.drag_anchor else {
            return;
        };
        self.pan(last_x - pointer_x);
        self.drag_anchor = Some(pointer_x);
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Jump back to the level origin
    pub fn reset(&mut self) {
        self.offset_x = 0;
        self.offset_y = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_boundaries() {
        let mut camera = Camera::default();
        camera.pan(100_000);
        camera.update(2048, 1024);
        assert_eq!(camera.offset_x(), 1024);

        camera.pan(-100_000);
        camera.update(2048, 1024);
        assert_eq!(camera.offset_x(), 0);
    }

    #[test]
    fn test_clamp_for_level_wider_than_i32() {
        let mut camera = Camera::default();
        camera.pan(i32::MAX);
        camera.update(u32::MAX as u64 * 64, 1024);
        assert_eq!(camera.offset_x(), i32::MAX);
    }

    #[test]
    fn test_level_narrower_than_viewport() {
        let mut camera = Camera::default();
        camera.pan(300);
        camera.update(512, 1024);
        assert_eq!(camera.offset_x(), 0);
    }

    #[test]
    fn test_pan_is_unclamped_until_update() {
        let mut camera = Camera::default();
        camera.pan_left();
        assert_eq!(camera.offset_x(), -DEFAULT_PAN_STEP);
        camera.update(4096, 1024);
        assert_eq!(camera.offset_x(), 0);

        camera.pan_right();
        camera.pan_right();
        camera.update(4096, 1024);
        assert_eq!(camera.offset_x(), 2 * DEFAULT_PAN_STEP);
    }

    #[test]
    fn test_custom_pan_step() {
        let mut camera = Camera::new(250);
        camera.pan_right();
        assert_eq!(camera.offset_x(), 250);
        camera.set_pan_step(10);
        camera.pan_left();
        assert_eq!(camera.offset_x(), 240);
    }

    #[test]
    fn test_drag_is_delta_based() {
        let mut camera = Camera::default();
        camera.start_drag(500);
        camera.continue_drag(450);
        assert_eq!(camera.offset_x(), 50);
        camera.continue_drag(400);
        assert_eq!(camera.offset_x(), 100);
        camera.continue_drag(420);
        assert_eq!(camera.offset_x(), 80);
        camera.end_drag();
        assert!(!camera.is_dragging());

        // Motion without an active drag does nothing
        camera.continue_drag(0);
        assert_eq!(camera.offset_x(), 80);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::default();
        camera.pan(640);
        camera.reset();
        assert_eq!(camera.offset_x(), 0);
        assert_eq!(camera.offset_y(), 0);
    }
}
