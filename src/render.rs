//! Drawing capability consumed by the engine.
//!
//! The engine never talks to a canvas directly. It drives a [`Surface`], which
//! the browser front-end implements over `CanvasRenderingContext2d` and tests
//! implement with [`RecordingSurface`].

use crate::constants::{
    BLOOM_ALPHA_STEP, BLOOM_LAYERS, BLOOM_SCALE_STEP, WATERMARK_FAMILY, WATERMARK_MARGIN,
    WATERMARK_SIZE, WATERMARK_TEXT,
};
use crate::core::constants::{BG_DARK, BG_LIGHT, WATERMARK_DARK, WATERMARK_LIGHT};
use crate::core::GlyphTransform;
use glam::Vec2;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("draw call failed: {0}")]
    Draw(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn gray(v: u8) -> Self {
        Self {
            r: v,
            g: v,
            b: v,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_css(self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

// Palette
#[inline]
pub fn background(dark_mode: bool) -> Rgba {
    Rgba::gray(if dark_mode { BG_DARK } else { BG_LIGHT })
}

/// Glyph ink is the inverse of the background.
#[inline]
pub fn ink(dark_mode: bool) -> Rgba {
    Rgba::gray(if dark_mode { BG_LIGHT } else { BG_DARK })
}

#[inline]
pub fn watermark_ink(dark_mode: bool) -> Rgba {
    Rgba::gray(if dark_mode {
        WATERMARK_DARK
    } else {
        WATERMARK_LIGHT
    })
}

pub trait TextMeasure {
    fn measure_text(&mut self, text: &str) -> f32;

    fn measure_glyph(&mut self, glyph: char) -> f32 {
        let mut buf = [0u8; 4];
        self.measure_text(glyph.encode_utf8(&mut buf))
    }
}

/// Immediate-mode 2D drawing with a push/pop transform stack.
///
/// Text is drawn with its left edge at `pos.x` and its baseline at `pos.y`.
pub trait Surface: TextMeasure {
    fn size(&self) -> Vec2;
    /// Fill the whole surface, ignoring the current transform.
    fn background(&mut self, color: Rgba);
    fn push(&mut self);
    fn pop(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn scale(&mut self, factor: f32);
    fn rotate(&mut self, radians: f32);
    fn fill(&mut self, color: Rgba);
    fn set_font(&mut self, family: &str, size_px: f32);
    fn draw_text(&mut self, text: &str, pos: Vec2) -> Result<(), SurfaceError>;
}

/// One halo copy drawn behind a glyph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomLayer {
    pub scale: f32,
    pub alpha: f32,
}

/// Halo layers for a glyph at `scale`, outermost (largest, most opaque) first.
pub fn bloom_layers(scale: f32) -> impl Iterator<Item = BloomLayer> {
    (1..=BLOOM_LAYERS).rev().map(move |i| BloomLayer {
        scale: scale * (1.0 + i as f32 * BLOOM_SCALE_STEP),
        alpha: i as f32 * BLOOM_ALPHA_STEP,
    })
}

/// Draw one glyph centered on `t.pos`, scoped so no transform leaks to the
/// next glyph even when the text call fails.
pub fn draw_glyph<S: Surface + ?Sized>(
    surface: &mut S,
    glyph: &str,
    advance: f32,
    t: GlyphTransform,
    color: Rgba,
) -> Result<(), SurfaceError> {
    surface.push();
    surface.translate(t.pos);
    surface.scale(t.scale);
    surface.rotate(t.rotation);
    surface.fill(color);
    let res = surface.draw_text(glyph, Vec2::new(-advance * 0.5, 0.0));
    surface.pop();
    res
}

/// Bloom halo for a glyph, co-located with its final transform.
pub fn draw_bloom<S: Surface + ?Sized>(
    surface: &mut S,
    glyph: &str,
    advance: f32,
    t: GlyphTransform,
    dark_mode: bool,
) -> Result<(), SurfaceError> {
    let base = ink(dark_mode);
    for layer in bloom_layers(t.scale) {
        let halo = GlyphTransform {
            scale: layer.scale,
            ..t
        };
        draw_glyph(surface, glyph, advance, halo, base.with_alpha(layer.alpha))?;
    }
    Ok(())
}

/// Right-aligned version tag in the bottom-right corner.
pub fn draw_watermark<S: Surface + ?Sized>(
    surface: &mut S,
    dark_mode: bool,
) -> Result<(), SurfaceError> {
    let size = surface.size();
    surface.push();
    surface.set_font(WATERMARK_FAMILY, WATERMARK_SIZE);
    let width = surface.measure_text(WATERMARK_TEXT);
    surface.fill(watermark_ink(dark_mode));
    let pos = Vec2::new(
        size.x - WATERMARK_MARGIN - width,
        size.y - WATERMARK_MARGIN,
    );
    let res = surface.draw_text(WATERMARK_TEXT, pos);
    surface.pop();
    res
}

// ---------------- Recording surface ----------------

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Background(Rgba),
    Push,
    Pop,
    Translate(Vec2),
    Scale(f32),
    Rotate(f32),
    Fill(Rgba),
    Font { family: String, size: f32 },
    Text { text: String, pos: Vec2 },
}

/// Surface that records every call. Glyphs measure `glyph_width` per char.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    pub size: Vec2,
    pub glyph_width: f32,
    pub commands: Vec<DrawCommand>,
    depth: usize,
    max_depth: usize,
    fail_text_after: Option<usize>,
    texts_drawn: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            glyph_width: 10.0,
            commands: Vec::new(),
            depth: 0,
            max_depth: 0,
            fail_text_after: None,
            texts_drawn: 0,
        }
    }

    /// Make every text call after the first `n` fail.
    pub fn fail_text_after(mut self, n: usize) -> Self {
        self.fail_text_after = Some(n);
        self
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.max_depth = self.depth;
    }

    /// Current push/pop nesting; zero between frames when every push popped.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, Vec2)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, pos } => Some((text.as_str(), *pos)),
            _ => None,
        })
    }
}

impl TextMeasure for RecordingSurface {
    fn measure_text(&mut self, text: &str) -> f32 {
        text.chars().count() as f32 * self.glyph_width
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn background(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn push(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.commands.push(DrawCommand::Push);
    }

    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.commands.push(DrawCommand::Pop);
    }

    fn translate(&mut self, offset: Vec2) {
        self.commands.push(DrawCommand::Translate(offset));
    }

    fn scale(&mut self, factor: f32) {
        self.commands.push(DrawCommand::Scale(factor));
    }

    fn rotate(&mut self, radians: f32) {
        self.commands.push(DrawCommand::Rotate(radians));
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn set_font(&mut self, family: &str, size: f32) {
        self.commands.push(DrawCommand::Font {
            family: family.to_string(),
            size,
        });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) -> Result<(), SurfaceError> {
        if let Some(limit) = self.fail_text_after {
            if self.texts_drawn >= limit {
                return Err(SurfaceError::Draw("recording surface refused text".into()));
            }
        }
        self.texts_drawn += 1;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bloom_layers_grow_outward_first() {
        let layers: Vec<BloomLayer> = bloom_layers(2.0).collect();
        assert_eq!(layers.len(), 4);
        assert!((layers[0].scale - 2.0 * 1.6).abs() < 1e-5);
        assert!((layers[0].alpha - 0.6).abs() < 1e-5);
        assert!((layers[3].scale - 2.0 * 1.15).abs() < 1e-5);
        assert!((layers[3].alpha - 0.15).abs() < 1e-5);
        for pair in layers.windows(2) {
            assert!(pair[0].scale > pair[1].scale);
            assert!(pair[0].alpha > pair[1].alpha);
        }
    }

    #[test]
    fn glyph_draw_pops_even_on_failure() {
        let mut s = RecordingSurface::new(100.0, 100.0).fail_text_after(0);
        let t = GlyphTransform {
            pos: Vec2::new(10.0, 20.0),
            scale: 1.0,
            rotation: 0.0,
        };
        assert!(draw_glyph(&mut s, "a", 10.0, t, ink(false)).is_err());
        assert_eq!(s.depth(), 0);
    }

    #[test]
    fn watermark_is_right_aligned() {
        let mut s = RecordingSurface::new(400.0, 300.0);
        draw_watermark(&mut s, true).unwrap();
        let (text, pos) = s.texts().next().unwrap();
        assert_eq!(text, WATERMARK_TEXT);
        let width = WATERMARK_TEXT.chars().count() as f32 * s.glyph_width;
        assert!((pos.x + width - 380.0).abs() < 1e-3);
        assert_eq!(pos.y, 280.0);
        assert!(s.commands.contains(&DrawCommand::Fill(Rgba::gray(WATERMARK_DARK))));
    }

    #[test]
    fn css_color_format() {
        assert_eq!(Rgba::gray(0).with_alpha(0.45).to_css(), "rgba(0,0,0,0.45)");
        assert_eq!(background(true), Rgba::gray(0));
        assert_eq!(ink(true), Rgba::gray(255));
    }
}
