//! Generative typography playground.
//!
//! A grid of glyphs drawn to a 2D surface, animated by coherent noise and
//! distorted around the pointer. The engine is host-agnostic: the browser
//! front-end (wasm32 only) supplies a canvas [`render::Surface`], pointer
//! samples and a frame callback, and calls [`Engine::tick`] once per frame.

pub mod constants;
pub mod core;
pub mod frame;
pub mod input;
pub mod perf;
pub mod render;

#[cfg(target_arch = "wasm32")]
mod canvas;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod web;

pub use crate::core::{Config, Effect, FontCatalog, FontInfo, GlyphCell, GlyphGrid};
pub use crate::frame::{Engine, FrameOutcome, FrameReport, RenderState};
pub use crate::input::PointerInput;
pub use crate::perf::{FpsStatus, PerfMonitor, PerfNotice};
pub use crate::render::{RecordingSurface, Surface};
