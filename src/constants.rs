/// Grid, effect and frame tuning constants.
///
/// These constants express intended behavior (spacing ratios, amplitudes,
/// smoothing factors, thresholds) and keep magic numbers out of the engine.

// Grid layout: glyphs are wider than tall, so rows pack tighter than columns
pub const GRID_SPACING_X: f32 = 0.85;
pub const GRID_SPACING_Y: f32 = 1.15;

// Density ceilings (glyphs). Canvases narrower than the breakpoint count as mobile.
pub const MOBILE_BREAKPOINT_PX: f32 = 800.0;
pub const MOBILE_MAX_GLYPHS: u32 = 800;
pub const DESKTOP_MAX_GLYPHS: u32 = 2500;

// Source text handling
pub const MIN_TEXT_CHARS: usize = 5;
pub const REPEAT_BELOW_CHARS: usize = 20;
pub const REPEAT_TARGET_CHARS: usize = 100;
pub const FALLBACK_SAMPLE_TEXT: &str = "Typography playground - fonts not loaded";

// Per-cell random ranges
pub const NOISE_SEED_RANGE: f32 = 10_000.0;

// Wave: idle drift and pointer-driven turbulence (px)
pub const WAVE_TIME_STEP: f32 = 0.02; // per frame
pub const WAVE_IDLE_AMP_Y: f32 = 30.0;
pub const WAVE_IDLE_AMP_X: f32 = 15.0;
pub const WAVE_IDLE_RATE_X: f32 = 0.8;
pub const WAVE_HOVER_AMP_Y: f32 = 60.0;
pub const WAVE_HOVER_AMP_X: f32 = 30.0;
pub const WAVE_HOVER_GAIN: f32 = 1.5; // multiplied by proximity
pub const WAVE_HOVER_RATE_Y: f32 = 3.0;
pub const WAVE_HOVER_RATE_X: f32 = 2.5;
pub const WAVE_HOVER_PROX_Y: f32 = 10.0;
pub const WAVE_HOVER_PROX_X: f32 = 8.0;

// Scatter: exponential smoothing of the repulsion magnitude
pub const SCATTER_MAX_PX: f32 = 180.0;
pub const SCATTER_RISE: f32 = 0.15; // lerp toward target inside radius
pub const SCATTER_RELEASE: f32 = 0.05; // lerp toward zero outside radius
pub const SCATTER_DISABLED_DECAY: f32 = 0.93; // per-frame factor once toggled off
pub const SCATTER_REST_PX: f32 = 0.01; // below this the glyph is back at rest

// Idle rotation
pub const IDLE_SPACE_FREQ: f32 = 0.005;
pub const IDLE_TIME_STEP: f32 = 0.003; // per frame
pub const IDLE_GAIN: f32 = 0.5;

// Bloom halo
pub const BLOOM_LAYERS: u32 = 4;
pub const BLOOM_SCALE_STEP: f32 = 0.15;
pub const BLOOM_ALPHA_STEP: f32 = 0.15;

// Pointer warm-up: before real input arrives the pointer reads (0, 0)
pub const POINTER_WARMUP_FRAMES: u64 = 10;
pub const OFFSCREEN_POINTER: f32 = -5000.0;

// Watermark overlay
pub const WATERMARK_TEXT: &str = "Typo Umprum Playground v3.1";
pub const WATERMARK_SIZE: f32 = 14.0;
pub const WATERMARK_MARGIN: f32 = 20.0;
pub const WATERMARK_FAMILY: &str = "sans-serif";

// Performance monitor
pub const FPS_WINDOW: usize = 60;
pub const FPS_LOW: f32 = 30.0; // below: degrade heavy effects
pub const FPS_WARN: f32 = 45.0; // below: show indicator; at or above: reset latch

// Slider ranges mirrored by the host controls
pub const SCALE_STEP: f32 = 0.1;
pub const SCALE_MIN: f32 = 1.0;
pub const SCALE_MAX: f32 = 6.0;
pub const RADIUS_STEP: f32 = 10.0;
pub const RADIUS_MIN: f32 = 50.0;
pub const RADIUS_MAX: f32 = 600.0;
