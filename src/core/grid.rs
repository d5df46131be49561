//! Glyph grid construction.
//!
//! The grid is purely geometric: an anisotropic lattice sized so roughly
//! `target_count` glyphs cover the canvas, filled row by row with characters
//! taken cyclically from the source text.

use super::fonts::FontInfo;
use crate::constants::{
    FALLBACK_SAMPLE_TEXT, GRID_SPACING_X, GRID_SPACING_Y, MIN_TEXT_CHARS, NOISE_SEED_RANGE,
    REPEAT_BELOW_CHARS, REPEAT_TARGET_CHARS,
};
use crate::render::TextMeasure;
use glam::Vec2;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    #[error("no font metadata available")]
    MissingFont,
    #[error("canvas has no drawable area ({0}x{1})")]
    EmptyCanvas(f32, f32),
    #[error("target glyph count is zero")]
    ZeroDensity,
}

/// Smoothed pointer-repulsion state. Lives across frames.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScatterState {
    pub amount: f32,
    pub angle: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlyphCell {
    pub glyph: char,
    /// Grid origin of the glyph; never changes after build.
    pub base: Vec2,
    /// Last rendered position.
    pub pos: Vec2,
    pub advance: f32,
    pub angle_offset: f32,
    pub noise_seed: Vec2,
    pub last_scale: f32,
    pub last_rotation: f32,
    pub scatter: ScatterState,
}

impl GlyphCell {
    pub fn new(glyph: char, base: Vec2, advance: f32, angle_offset: f32, noise_seed: Vec2) -> Self {
        Self {
            glyph,
            base,
            pos: base,
            advance,
            angle_offset,
            noise_seed,
            last_scale: 1.0,
            last_rotation: 0.0,
            scatter: ScatterState::default(),
        }
    }
}

/// Lattice geometry for a canvas and target density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub spacing: Vec2,
    /// Center of the first cell.
    pub origin: Vec2,
}

impl GridLayout {
    pub fn compute(size: Vec2, target_count: u32) -> Result<Self, BuildError> {
        if !(size.x > 0.0 && size.y > 0.0) {
            return Err(BuildError::EmptyCanvas(size.x, size.y));
        }
        if target_count == 0 {
            return Err(BuildError::ZeroDensity);
        }
        let edge = (size.x * size.y / target_count as f32).sqrt();
        let spacing = Vec2::new(edge * GRID_SPACING_X, edge * GRID_SPACING_Y);
        let cols = (size.x / spacing.x).floor() as usize;
        let rows = (size.y / spacing.y).floor() as usize;
        // center the lattice, half a cell in from each edge
        let origin = Vec2::new(
            (size.x - cols as f32 * spacing.x) / 2.0 + spacing.x / 2.0,
            (size.y - rows as f32 * spacing.y) / 2.0 + spacing.y / 2.0,
        );
        Ok(Self {
            cols,
            rows,
            spacing,
            origin,
        })
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn position(&self, col: usize, row: usize) -> Vec2 {
        self.origin + Vec2::new(col as f32 * self.spacing.x, row as f32 * self.spacing.y)
    }
}

#[derive(Clone, Debug, Default)]
pub struct GlyphGrid {
    pub cells: Vec<GlyphCell>,
    pub layout: Option<GridLayout>,
}

impl GlyphGrid {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GlyphCell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, GlyphCell> {
        self.cells.iter_mut()
    }
}

/// Pick the text a grid is filled with.
///
/// Empty or very short text is replaced by the font's sample; anything still
/// short is repeated so large grids don't show a tight visible cycle.
pub fn prepare_text(active: &str, sample: &str) -> String {
    let sample = if sample.is_empty() {
        FALLBACK_SAMPLE_TEXT
    } else {
        sample
    };
    let mut text = if active.chars().count() < MIN_TEXT_CHARS {
        sample
    } else {
        active
    };
    if text.chars().count() < MIN_TEXT_CHARS {
        text = FALLBACK_SAMPLE_TEXT;
    }
    let len = text.chars().count();
    if len < REPEAT_BELOW_CHARS {
        text.repeat(REPEAT_TARGET_CHARS.div_ceil(len))
    } else {
        text.to_string()
    }
}

/// Build a fresh grid. Geometry depends only on the inputs; the per-cell
/// angle offsets and noise seeds are drawn from `rng`.
pub fn build<M, R>(
    size: Vec2,
    target_count: u32,
    source_text: &str,
    font: Option<&FontInfo>,
    measure: &mut M,
    rng: &mut R,
) -> Result<GlyphGrid, BuildError>
where
    M: TextMeasure + ?Sized,
    R: Rng + ?Sized,
{
    let font = font.ok_or(BuildError::MissingFont)?;
    let layout = GridLayout::compute(size, target_count)?;
    let text: Vec<char> = prepare_text(source_text, &font.sample_text)
        .chars()
        .collect();

    let mut cells = Vec::with_capacity(layout.cell_count());
    let mut glyphs = text.iter().copied().cycle();
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let glyph = glyphs.next().unwrap_or(' ');
            let advance = measure.measure_glyph(glyph);
            let seed = Vec2::new(
                rng.gen_range(0.0..NOISE_SEED_RANGE),
                rng.gen_range(0.0..NOISE_SEED_RANGE),
            );
            cells.push(GlyphCell::new(
                glyph,
                layout.position(col, row),
                advance,
                rng.gen_range(-1.0..=1.0),
                seed,
            ));
        }
    }
    Ok(GlyphGrid {
        cells,
        layout: Some(layout),
    })
}
