//! Per-glyph effects.
//!
//! Every effect is a small function of the cell, the frame counter and the
//! pointer proximity. Position and rotation contributions are added together,
//! so switching one effect off never rescales another.

use super::config::Config;
use super::grid::{GlyphCell, ScatterState};
use super::noise::{signed, NoiseField};
use super::proximity::Proximity;
use crate::constants::*;
use glam::Vec2;
use std::f32::consts::PI;

/// Final placement of one glyph for a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphTransform {
    pub pos: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

/// Per-frame inputs shared by every cell.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    pub frame: u64,
    pub pointer: Vec2,
    pub config: &'a Config,
}

/// Noise-driven drift. Zero when disabled; pointer proximity adds a faster,
/// larger term on top of the idle motion.
pub fn wave_offset<N: NoiseField + ?Sized>(
    seed: Vec2,
    frame: u64,
    proximity: f32,
    enabled: bool,
    noise: &N,
) -> Vec2 {
    if !enabled {
        return Vec2::ZERO;
    }
    let t = frame as f32 * WAVE_TIME_STEP;
    let mut y = signed(noise.noise2(seed.y, t)) * WAVE_IDLE_AMP_Y;
    let mut x = signed(noise.noise2(seed.x, t * WAVE_IDLE_RATE_X)) * WAVE_IDLE_AMP_X;
    if proximity > 0.0 {
        let gain = proximity * WAVE_HOVER_GAIN;
        y += signed(noise.noise2(
            seed.y * 2.0 + proximity * WAVE_HOVER_PROX_Y,
            t * WAVE_HOVER_RATE_Y,
        )) * WAVE_HOVER_AMP_Y
            * gain;
        x += signed(noise.noise2(
            seed.x * 2.0 + proximity * WAVE_HOVER_PROX_X,
            t * WAVE_HOVER_RATE_X,
        )) * WAVE_HOVER_AMP_X
            * gain;
    }
    Vec2::new(x, y)
}

/// Advance the smoothed scatter state one frame and return its displacement.
///
/// Glyphs flee the pointer along the pointer-to-glyph direction. The amount
/// eases toward its target and eases back to rest once the pointer leaves or
/// the effect is switched off; the last angle is kept while it settles.
pub fn step_scatter(
    state: &mut ScatterState,
    base: Vec2,
    pointer: Vec2,
    proximity: f32,
    enabled: bool,
) -> Vec2 {
    if !enabled {
        state.amount *= SCATTER_DISABLED_DECAY;
        settle(state);
    } else if proximity > 0.0 {
        let target = proximity * SCATTER_MAX_PX;
        state.amount += (target - state.amount) * SCATTER_RISE;
        let away = base - pointer;
        state.angle = away.y.atan2(away.x);
    } else {
        state.amount += (0.0 - state.amount) * SCATTER_RELEASE;
        settle(state);
    }
    Vec2::from_angle(state.angle) * state.amount
}

#[inline]
fn settle(state: &mut ScatterState) {
    if state.amount.abs() < SCATTER_REST_PX {
        state.amount = 0.0;
    }
}

/// Slow rotational drift from 3D noise over grid position and time.
pub fn idle_rotation<N: NoiseField + ?Sized>(
    base: Vec2,
    frame: u64,
    idle_strength: f32,
    noise: &N,
) -> f32 {
    if idle_strength <= 0.0 {
        return 0.0;
    }
    let v = noise.noise3(
        base.x * IDLE_SPACE_FREQ,
        base.y * IDLE_SPACE_FREQ,
        frame as f32 * IDLE_TIME_STEP,
    );
    signed(v) * idle_strength * IDLE_GAIN
}

#[inline]
pub fn proximity_scale(max_scale: f32, proximity: f32) -> f32 {
    1.0 + (max_scale - 1.0) * proximity
}

#[inline]
pub fn proximity_rotation(idle: f32, angle_offset: f32, proximity: f32) -> f32 {
    if proximity > 0.0 {
        idle + angle_offset * proximity * PI
    } else {
        idle
    }
}

/// Run every effect for one cell. Only `cell.scatter` is mutated.
pub fn compose<N: NoiseField + ?Sized>(
    cell: &mut GlyphCell,
    ctx: &EffectContext<'_>,
    noise: &N,
) -> GlyphTransform {
    let cfg = ctx.config;
    let prox = Proximity::of(cell, ctx.pointer, cfg.interaction_radius);
    let wave = wave_offset(cell.noise_seed, ctx.frame, prox.value, cfg.wave, noise);
    let scatter = step_scatter(
        &mut cell.scatter,
        cell.base,
        ctx.pointer,
        prox.value,
        cfg.scatter,
    );
    let idle = idle_rotation(cell.base, ctx.frame, cfg.idle_strength, noise);
    GlyphTransform {
        pos: cell.base + wave + scatter,
        scale: proximity_scale(cfg.max_scale, prox.value),
        rotation: proximity_rotation(idle, cell.angle_offset, prox.value),
    }
}

impl GlyphCell {
    /// Cache a rendered transform for replay while paused.
    #[inline]
    pub fn remember(&mut self, t: GlyphTransform) {
        self.pos = t.pos;
        self.last_scale = t.scale;
        self.last_rotation = t.rotation;
    }

    #[inline]
    pub fn cached_transform(&self) -> GlyphTransform {
        GlyphTransform {
            pos: self.pos,
            scale: self.last_scale,
            rotation: self.last_rotation,
        }
    }
}
