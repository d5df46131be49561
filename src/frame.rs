//! Per-frame driver.
//!
//! The host calls [`Engine::tick`] once per animation frame. Each tick reads the
//! configuration fresh, rebuilds the grid when its inputs changed, then either
//! animates and draws every glyph (running) or replays the cached transforms
//! (paused).

use crate::core::effects::{self, EffectContext};
use crate::core::grid::{self, BuildError, GlyphGrid};
use crate::core::{Config, FontCatalog, NoiseField, PerlinField};
use crate::input::PointerInput;
use crate::perf::{FpsStatus, PerfMonitor, PerfNotice};
use crate::render::{self, Surface, SurfaceError};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const DEFAULT_FAMILY: &str = "sans-serif";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderState {
    Running,
    Paused,
}

impl RenderState {
    #[inline]
    pub fn of(config: &Config) -> Self {
        if config.paused {
            RenderState::Paused
        } else {
            RenderState::Running
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Effects evaluated and every glyph drawn.
    Drawn { glyphs: usize },
    /// Paused: cached transforms replayed.
    Replayed { glyphs: usize },
    /// Running with no grid; background only.
    Empty,
    /// A draw call failed; the frame was abandoned.
    Skipped,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    pub fps: Option<f32>,
    pub status: Option<FpsStatus>,
    pub notice: Option<PerfNotice>,
}

/// Everything a grid depends on. A change in any field forces a rebuild.
#[derive(Clone, Debug, PartialEq)]
struct GridKey {
    size: Vec2,
    target: u32,
    text: String,
    font: String,
    style: usize,
}

impl GridKey {
    fn new(config: &Config, size: Vec2) -> Self {
        Self {
            size,
            target: config.target_glyph_count,
            text: config.active_text.clone(),
            font: config.font_name.clone(),
            style: config.style_index,
        }
    }
}

pub struct Engine<N: NoiseField = PerlinField> {
    grid: GlyphGrid,
    fonts: FontCatalog,
    noise: N,
    rng: StdRng,
    perf: PerfMonitor,
    frame: u64,
    state: RenderState,
    built_for: Option<GridKey>,
}

impl Engine<PerlinField> {
    pub fn new(fonts: FontCatalog, seed: u64) -> Self {
        Self::with_noise(fonts, PerlinField::new(seed as u32), seed)
    }
}

impl<N: NoiseField> Engine<N> {
    pub fn with_noise(fonts: FontCatalog, noise: N, seed: u64) -> Self {
        Self {
            grid: GlyphGrid::empty(),
            fonts,
            noise,
            rng: StdRng::seed_from_u64(seed),
            perf: PerfMonitor::new(),
            frame: 0,
            state: RenderState::Running,
            built_for: None,
        }
    }

    pub fn grid(&self) -> &GlyphGrid {
        &self.grid
    }

    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    /// Running frames drawn so far; the animation clock.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn perf(&self) -> &PerfMonitor {
        &self.perf
    }

    /// Replace font metadata (e.g. once fonts finish loading) and rebuild on
    /// the next tick.
    pub fn set_fonts(&mut self, fonts: FontCatalog) {
        log::info!("[grid] {} fonts available", fonts.len());
        self.fonts = fonts;
        self.invalidate();
    }

    pub fn invalidate(&mut self) {
        self.built_for = None;
    }

    /// Build a new grid for the current configuration and swap it in. On
    /// failure the engine is left with an empty grid.
    pub fn rebuild<S: Surface + ?Sized>(
        &mut self,
        config: &mut Config,
        surface: &mut S,
    ) -> Result<usize, BuildError> {
        let size = surface.size();
        if config.clamp_density(size.x) {
            log::info!(
                "[grid] density clamped to {} for {}px canvas",
                config.target_glyph_count,
                size.x
            );
        }
        self.built_for = Some(GridKey::new(config, size));
        self.apply_font(config, surface);

        let font = self.fonts.resolve(&config.font_name);
        let built = grid::build(
            size,
            config.target_glyph_count,
            &config.active_text,
            font,
            surface,
            &mut self.rng,
        );
        match built {
            Ok(grid) => {
                if let Some(l) = grid.layout {
                    log::info!(
                        "[grid] {}x{} = {} glyphs (spacing {:.1}x{:.1})",
                        l.cols,
                        l.rows,
                        grid.len(),
                        l.spacing.x,
                        l.spacing.y
                    );
                }
                self.grid = grid;
                Ok(self.grid.len())
            }
            Err(e) => {
                log::warn!("[grid] build failed: {}", e);
                self.grid = GlyphGrid::empty();
                Err(e)
            }
        }
    }

    /// Rebuild if the canvas size, density, text or font changed since the
    /// last build. Returns true when a rebuild happened.
    pub fn sync_grid<S: Surface + ?Sized>(&mut self, config: &mut Config, surface: &mut S) -> bool {
        let size = surface.size();
        config.clamp_density(size.x);
        let key = GridKey::new(config, size);
        if self.built_for.as_ref() == Some(&key) {
            return false;
        }
        _ = self.rebuild(config, surface);
        true
    }

    pub fn tick<S: Surface + ?Sized>(
        &mut self,
        dt: Duration,
        config: &mut Config,
        input: &PointerInput,
        surface: &mut S,
    ) -> FrameReport {
        let fps = self.perf.sample(dt);
        let mut notice = None;
        if let Some(fps) = fps.filter(|_| self.perf.window_full()) {
            let (next, n) = self.perf.apply_backpressure(fps, std::mem::take(config));
            *config = next;
            notice = n;
        }

        self.sync_grid(config, surface);

        let state = RenderState::of(config);
        if state != self.state {
            log::info!("[frame] {:?} -> {:?} at frame {}", self.state, state, self.frame);
            self.state = state;
        }
        let drawn = match state {
            RenderState::Running => self.draw_running(config, input, surface),
            RenderState::Paused => self.draw_paused(config, surface),
        };
        let outcome = drawn.unwrap_or_else(|e| {
            log::warn!("[frame] skipped frame {}: {}", self.frame, e);
            FrameOutcome::Skipped
        });

        FrameReport {
            outcome,
            fps,
            status: fps.map(FpsStatus::from_fps),
            notice,
        }
    }

    fn apply_font<S: Surface + ?Sized>(&self, config: &Config, surface: &mut S) {
        let family = self
            .fonts
            .resolve(&config.font_name)
            .and_then(|f| f.family(config.style_index))
            .unwrap_or(DEFAULT_FAMILY);
        surface.set_font(family, config.base_font_size);
    }

    /// Step every cell's effects and cache the result. Runs to completion
    /// before anything is drawn, so a failed draw never splits the grid
    /// across two animation steps.
    fn update_cells(&mut self, config: &Config) {
        let ctx = EffectContext {
            frame: self.frame,
            pointer: config.last_pointer,
            config,
        };
        for cell in self.grid.iter_mut() {
            let t = effects::compose(cell, &ctx, &self.noise);
            cell.remember(t);
        }
        self.frame += 1;
    }

    fn draw_running<S: Surface + ?Sized>(
        &mut self,
        config: &mut Config,
        input: &PointerInput,
        surface: &mut S,
    ) -> Result<FrameOutcome, SurfaceError> {
        surface.background(render::background(config.dark_mode));
        if self.grid.is_empty() {
            return Ok(FrameOutcome::Empty);
        }
        config.last_pointer = input.resolve(self.frame);
        self.update_cells(config);
        self.draw_cells(config, surface)?;
        Ok(FrameOutcome::Drawn {
            glyphs: self.grid.len(),
        })
    }

    fn draw_paused<S: Surface + ?Sized>(
        &self,
        config: &Config,
        surface: &mut S,
    ) -> Result<FrameOutcome, SurfaceError> {
        surface.background(render::background(config.dark_mode));
        self.draw_cells(config, surface)?;
        Ok(FrameOutcome::Replayed {
            glyphs: self.grid.len(),
        })
    }

    /// Draw every cell at its cached transform, then the watermark.
    fn draw_cells<S: Surface + ?Sized>(
        &self,
        config: &Config,
        surface: &mut S,
    ) -> Result<(), SurfaceError> {
        self.apply_font(config, surface);
        let ink = render::ink(config.dark_mode);
        let mut buf = [0u8; 4];
        for cell in self.grid.iter() {
            let t = cell.cached_transform();
            let glyph = cell.glyph.encode_utf8(&mut buf);
            // halo sits directly under its own glyph
            if config.bloom {
                render::draw_bloom(surface, glyph, cell.advance, t, config.dark_mode)?;
            }
            render::draw_glyph(surface, glyph, cell.advance, t, ink)?;
        }
        render::draw_watermark(surface, config.dark_mode)
    }
}
