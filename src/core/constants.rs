// Playground defaults shared by the engine and the web frontend.

pub const VERSION: &str = "3.1";

// Typography
pub const BASE_FONT_SIZE: f32 = 24.0; // px, before per-glyph scaling
pub const DEFAULT_FONT_NAME: &str = "Ananas";

// Density and interaction
pub const DEFAULT_GLYPH_COUNT: u32 = 1200;
pub const DEFAULT_RADIUS: f32 = 280.0; // px
pub const DEFAULT_MAX_SCALE: f32 = 3.5;
pub const DEFAULT_IDLE_STRENGTH: f32 = 0.15;

// Palette (gray levels)
pub const BG_LIGHT: u8 = 255;
pub const BG_DARK: u8 = 0;
pub const WATERMARK_LIGHT: u8 = 150;
pub const WATERMARK_DARK: u8 = 100;
