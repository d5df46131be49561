//! Playground configuration.
//!
//! A single mutable record written by the host controls and read fresh by the
//! engine on every tick. The engine only writes `last_pointer` (and, through the
//! performance policy, the heavy effect toggles).

use super::constants::*;
use super::fonts::FontCatalog;
use crate::constants::{
    DESKTOP_MAX_GLYPHS, MOBILE_BREAKPOINT_PX, MOBILE_MAX_GLYPHS, RADIUS_MAX, RADIUS_MIN,
    RADIUS_STEP, SCALE_MAX, SCALE_MIN, SCALE_STEP,
};
use glam::Vec2;

/// The three user-toggleable effects. Idle rotation is governed by
/// `idle_strength` instead of a toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    Wave,
    Bloom,
    Scatter,
}

impl Effect {
    pub fn label(self) -> &'static str {
        match self {
            Effect::Wave => "wave",
            Effect::Bloom => "bloom",
            Effect::Scatter => "scatter",
        }
    }

    /// Inverse of [`Effect::label`], case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        [Effect::Wave, Effect::Bloom, Effect::Scatter]
            .into_iter()
            .find(|e| e.label().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub target_glyph_count: u32,
    pub interaction_radius: f32,
    pub max_scale: f32,
    pub dark_mode: bool,
    pub wave: bool,
    pub bloom: bool,
    pub scatter: bool,
    pub idle_strength: f32,
    pub paused: bool,
    pub active_text: String,
    pub last_pointer: Vec2,
    pub font_name: String,
    pub style_index: usize,
    pub base_font_size: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_glyph_count: DEFAULT_GLYPH_COUNT,
            interaction_radius: DEFAULT_RADIUS,
            max_scale: DEFAULT_MAX_SCALE,
            dark_mode: false,
            wave: false,
            bloom: false,
            scatter: false,
            idle_strength: DEFAULT_IDLE_STRENGTH,
            paused: false,
            active_text: String::new(),
            last_pointer: Vec2::ZERO,
            font_name: DEFAULT_FONT_NAME.to_string(),
            style_index: 0,
            base_font_size: BASE_FONT_SIZE,
        }
    }
}

/// Highest glyph count allowed for a canvas of the given width.
#[inline]
pub fn density_ceiling(canvas_width: f32) -> u32 {
    if canvas_width < MOBILE_BREAKPOINT_PX {
        MOBILE_MAX_GLYPHS
    } else {
        DESKTOP_MAX_GLYPHS
    }
}

impl Config {
    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Enforce the platform ceiling. Returns true when the value was lowered.
    pub fn clamp_density(&mut self, canvas_width: f32) -> bool {
        let limit = density_ceiling(canvas_width);
        if self.target_glyph_count > limit {
            self.target_glyph_count = limit;
            return true;
        }
        false
    }

    pub fn set_target_glyph_count(&mut self, count: u32, canvas_width: f32) {
        self.target_glyph_count = count;
        self.clamp_density(canvas_width);
    }

    pub fn effect_enabled(&self, effect: Effect) -> bool {
        match effect {
            Effect::Wave => self.wave,
            Effect::Bloom => self.bloom,
            Effect::Scatter => self.scatter,
        }
    }

    pub fn set_effect(&mut self, effect: Effect, on: bool) {
        match effect {
            Effect::Wave => self.wave = on,
            Effect::Bloom => self.bloom = on,
            Effect::Scatter => self.scatter = on,
        }
    }

    /// Flip an effect toggle and return its new state.
    pub fn toggle_effect(&mut self, effect: Effect) -> bool {
        let on = !self.effect_enabled(effect);
        self.set_effect(effect, on);
        log::info!("[config] {} effect {}", effect.label(), on_off(on));
        on
    }

    pub fn toggle_freeze(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// Nudge the max scale by whole slider steps, clamped to the slider range.
    pub fn adjust_scale(&mut self, steps: i32) {
        let next = self.max_scale + steps as f32 * SCALE_STEP;
        // keep one decimal so repeated nudges don't accumulate float drift
        self.max_scale = ((next * 10.0).round() / 10.0).clamp(SCALE_MIN, SCALE_MAX);
    }

    pub fn adjust_radius(&mut self, steps: i32) {
        let next = self.interaction_radius + steps as f32 * RADIUS_STEP;
        self.interaction_radius = next.clamp(RADIUS_MIN, RADIUS_MAX);
    }

    /// Switch font family. Loads the font's sample text as the active text,
    /// so the grid shows the new face's specimen. Unknown names are ignored.
    pub fn select_font(&mut self, name: &str, catalog: &FontCatalog) -> bool {
        match catalog.get(name) {
            Some(font) => {
                self.font_name = font.name.clone();
                self.active_text = font.sample_text.clone();
                true
            }
            None => {
                log::warn!("[config] unknown font {:?}", name);
                false
            }
        }
    }

    pub fn set_style(&mut self, index: usize) {
        self.style_index = index;
    }
}

#[inline]
fn on_off(on: bool) -> &'static str {
    if on {
        "enabled"
    } else {
        "disabled"
    }
}
