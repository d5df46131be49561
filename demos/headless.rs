//! Drive the engine without a browser: sweep a pointer across a recording
//! surface, freeze, and log what each phase drew.
//!
//! RUST_LOG=info cargo run --example headless

use std::time::Duration;
use typo_playground::core::constants::VERSION;
use typo_playground::{
    Config, Engine, FontCatalog, FontInfo, FrameOutcome, PointerInput, RecordingSurface,
};

fn catalog() -> FontCatalog {
    let mut fonts = FontCatalog::system_fallback();
    fonts.insert(FontInfo {
        name: "Ananas".to_string(),
        sample_text: "Ananas is a display face for playful headlines".to_string(),
        styles: vec!["Regular".to_string(), "Bold".to_string()],
        css_families: vec!["AnanasRegular".to_string(), "AnanasBold".to_string()],
        author: "Umprum".to_string(),
        year: 2026,
    });
    fonts
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("[demo] typo-playground v{} headless run", VERSION);

    let mut engine = Engine::new(catalog(), 42);
    let mut surface = RecordingSurface::new(1000.0, 800.0);
    let mut config = Config {
        wave: true,
        scatter: true,
        bloom: true,
        ..Config::default()
    };
    let dt = Duration::from_millis(16);

    let frames = 240;
    let mut drawn = 0usize;
    for i in 0..frames {
        let t = i as f32 / frames as f32;
        let input = PointerInput::mouse(100.0 + 800.0 * t, 400.0 + 150.0 * (t * 6.0).sin());
        surface.clear();
        let report = engine.tick(dt, &mut config, &input, &mut surface);
        if let FrameOutcome::Drawn { glyphs } = report.outcome {
            drawn = glyphs;
        }
        if i % 60 == 0 {
            log::info!(
                "[demo] frame {} fps={:?} commands={} pointer=({:.0},{:.0})",
                engine.frame(),
                report.fps,
                surface.commands.len(),
                config.last_pointer.x,
                config.last_pointer.y
            );
        }
    }

    let max_scatter = engine
        .grid()
        .iter()
        .map(|c| c.scatter.amount)
        .fold(0.0_f32, f32::max);
    log::info!("[demo] {} glyphs, max scatter {:.1}px", drawn, max_scatter);

    config.toggle_freeze();
    surface.clear();
    let report = engine.tick(dt, &mut config, &PointerInput::default(), &mut surface);
    log::info!("[demo] frozen: {:?}, {} draw commands", report.outcome, surface.commands.len());

    println!("{}", engine.perf().indicator_text(engine.grid().len()));
    Ok(())
}
