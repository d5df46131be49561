use super::grid::GlyphCell;
use glam::Vec2;

/// Pointer influence on one glyph for the current frame.
///
/// `value` falls off linearly from 1 (pointer on the glyph) to 0 at the
/// interaction radius, and is the single signal every effect reads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Proximity {
    pub distance: f32,
    pub value: f32,
}

impl Proximity {
    /// Proximity of a cell measured from its grid origin.
    #[inline]
    pub fn of(cell: &GlyphCell, pointer: Vec2, radius: f32) -> Self {
        proximity(cell.base, pointer, radius)
    }
}

#[inline]
pub fn proximity(reference: Vec2, pointer: Vec2, radius: f32) -> Proximity {
    let distance = reference.distance(pointer);
    let value = if radius > 0.0 && distance < radius {
        1.0 - distance / radius
    } else {
        0.0
    };
    Proximity { distance, value }
}
