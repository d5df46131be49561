use crate::constants::{OFFSCREEN_POINTER, POINTER_WARMUP_FRAMES};
use glam::Vec2;
use smallvec::SmallVec;

/// Pointer sample handed to the engine each frame, in canvas pixels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerInput {
    pub mouse: Vec2,
    pub touches: SmallVec<[Vec2; 4]>,
}

impl PointerInput {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self {
            mouse: Vec2::new(x, y),
            touches: SmallVec::new(),
        }
    }

    pub fn with_touch(mut self, x: f32, y: f32) -> Self {
        self.touches.push(Vec2::new(x, y));
        self
    }

    /// Coordinate the glyphs react to on `frame`.
    ///
    /// The first active touch wins over the mouse. During the first frames the
    /// host reports (0, 0) before any real input arrives; that reading is moved
    /// far off-canvas so the top-left glyphs don't flare up on load.
    pub fn resolve(&self, frame: u64) -> Vec2 {
        let p = self.touches.first().copied().unwrap_or(self.mouse);
        if p == Vec2::ZERO && frame < POINTER_WARMUP_FRAMES {
            return Vec2::splat(OFFSCREEN_POINTER);
        }
        p
    }
}
