// Shared fixtures for the host-side tests.
#![allow(dead_code)]

use std::time::Duration;
use typo_playground::core::NoiseField;
use typo_playground::{
    Config, Engine, FontCatalog, FontInfo, FrameReport, PointerInput, RecordingSurface,
};

pub const SAMPLE: &str = "Ananas is a display face for playful headlines";
pub const DT: Duration = Duration::from_millis(16);

/// Noise that always returns the same value, so effect output is exact.
#[derive(Clone, Copy, Debug)]
pub struct FlatNoise(pub f32);

impl NoiseField for FlatNoise {
    fn noise2(&self, _x: f32, _y: f32) -> f32 {
        self.0
    }
    fn noise3(&self, _x: f32, _y: f32, _z: f32) -> f32 {
        self.0
    }
}

pub fn ananas() -> FontInfo {
    FontInfo {
        name: "Ananas".to_string(),
        sample_text: SAMPLE.to_string(),
        styles: vec!["Regular".to_string(), "Bold".to_string()],
        css_families: vec!["AnanasRegular".to_string(), "AnanasBold".to_string()],
        author: "Umprum".to_string(),
        year: 2026,
    }
}

pub fn fonts() -> FontCatalog {
    let mut c = FontCatalog::new();
    c.insert(ananas());
    c
}

pub fn engine() -> Engine {
    Engine::new(fonts(), 7)
}

pub fn flat_engine(v: f32) -> Engine<FlatNoise> {
    Engine::with_noise(fonts(), FlatNoise(v), 7)
}

/// Tick `n` frames with a fresh command log each frame.
pub fn run<N: NoiseField>(
    engine: &mut Engine<N>,
    config: &mut Config,
    input: &PointerInput,
    surface: &mut RecordingSurface,
    n: usize,
) -> Option<FrameReport> {
    let mut last = None;
    for _ in 0..n {
        surface.clear();
        last = Some(engine.tick(DT, config, input, surface));
    }
    last
}
