//! [`Surface`] over a browser `CanvasRenderingContext2d`.

use crate::render::{Rgba, Surface, SurfaceError, TextMeasure};
use anyhow::anyhow;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl Canvas2dSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(Self { canvas, ctx })
    }
}

/// CSS font shorthand; named families with spaces must be quoted, generic
/// families must not.
#[inline]
fn css_font(family: &str, size_px: f32) -> String {
    if family.contains(' ') {
        format!("{}px \"{}\"", size_px, family)
    } else {
        format!("{}px {}", size_px, family)
    }
}

impl TextMeasure for Canvas2dSurface {
    fn measure_text(&mut self, text: &str) -> f32 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }
}

impl Surface for Canvas2dSurface {
    fn size(&self) -> Vec2 {
        Vec2::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn background(&mut self, color: Rgba) {
        let size = self.size();
        self.ctx.save();
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
        self.ctx.restore();
    }

    fn push(&mut self) {
        self.ctx.save();
    }

    fn pop(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn scale(&mut self, factor: f32) {
        _ = self.ctx.scale(factor as f64, factor as f64);
    }

    fn rotate(&mut self, radians: f32) {
        _ = self.ctx.rotate(radians as f64);
    }

    fn fill(&mut self, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn set_font(&mut self, family: &str, size_px: f32) {
        self.ctx.set_font(&css_font(family, size_px));
        self.ctx.set_text_baseline("alphabetic");
    }

    fn draw_text(&mut self, text: &str, pos: Vec2) -> Result<(), SurfaceError> {
        self.ctx
            .fill_text(text, pos.x as f64, pos.y as f64)
            .map_err(|e| SurfaceError::Draw(format!("{:?}", e)))
    }
}
