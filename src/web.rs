use crate::canvas::Canvas2dSurface;
use crate::core::constants::VERSION;
use crate::core::{Config, Effect, FontInfo};
use crate::frame::{Engine, FrameOutcome};
use crate::input::PointerInput;
use crate::perf::PerfNotice;
use crate::render::Surface;
use crate::{dom, events, FontCatalog};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const SKIP_LOG_EVERY: u64 = 60;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("typo-playground v{} loaded", VERSION);
    Ok(())
}

fn init(canvas_id: &str) -> anyhow::Result<Rc<RefCell<FrameContext>>> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    dom::fit_canvas_to_container(&canvas);
    events::wire_resize(&canvas);

    let pointer = Rc::new(RefCell::new(PointerInput::default()));
    events::wire_pointer_handlers(&canvas, pointer.clone());

    // The system face keeps the grid populated until the page registers fonts.
    let engine = Engine::new(FontCatalog::system_fallback(), rand::random());
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        engine,
        config: Config::default(),
        surface: Canvas2dSurface::new(canvas)?,
        pointer,
        last_instant: Instant::now(),
        skipped: 0,
    }));
    start_loop(frame_ctx.clone());
    Ok(frame_ctx)
}

pub struct FrameContext {
    pub engine: Engine,
    pub config: Config,
    pub surface: Canvas2dSurface,
    pub pointer: Rc<RefCell<PointerInput>>,
    pub last_instant: Instant,
    pub skipped: u64,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;

        let input = self.pointer.borrow().clone();
        let report = self
            .engine
            .tick(dt, &mut self.config, &input, &mut self.surface);
        if report.outcome == FrameOutcome::Skipped {
            self.skipped += 1;
            if self.skipped % SKIP_LOG_EVERY == 1 {
                log::warn!("[web] {} frames skipped so far", self.skipped);
            }
        }
        if let Some(PerfNotice::EffectsDisabled { fps }) = report.notice {
            log::warn!("[web] disabled effects for better performance (fps={})", fps);
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &TickClosure) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Page-facing handle. Control widgets call these between frames; the engine
/// picks up every change on its next tick.
#[wasm_bindgen]
pub struct Playground {
    ctx: Rc<RefCell<FrameContext>>,
}

#[wasm_bindgen]
impl Playground {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<Playground, JsValue> {
        let ctx = init(canvas_id).map_err(|e| {
            log::error!("init error: {:?}", e);
            JsValue::from_str(&e.to_string())
        })?;
        Ok(Playground { ctx })
    }

    /// Flip "wave", "bloom" or "scatter". Returns the new state.
    pub fn toggle_effect(&self, name: &str) -> Result<bool, JsValue> {
        let effect = Effect::parse(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown effect {:?}", name)))?;
        Ok(self.ctx.borrow_mut().config.toggle_effect(effect))
    }

    pub fn toggle_freeze(&self) -> bool {
        self.ctx.borrow_mut().config.toggle_freeze()
    }

    pub fn toggle_dark_mode(&self) -> bool {
        self.ctx.borrow_mut().config.toggle_dark_mode()
    }

    /// Returns the count actually applied after the platform ceiling.
    pub fn set_density(&self, count: u32) -> u32 {
        let mut ctx = self.ctx.borrow_mut();
        let width = ctx.surface.size().x;
        ctx.config.set_target_glyph_count(count, width);
        ctx.config.target_glyph_count
    }

    pub fn adjust_scale(&self, steps: i32) -> f32 {
        let mut ctx = self.ctx.borrow_mut();
        ctx.config.adjust_scale(steps);
        ctx.config.max_scale
    }

    pub fn adjust_radius(&self, steps: i32) -> f32 {
        let mut ctx = self.ctx.borrow_mut();
        ctx.config.adjust_radius(steps);
        ctx.config.interaction_radius
    }

    pub fn set_text(&self, text: &str) {
        self.ctx.borrow_mut().config.active_text = text.to_string();
    }

    pub fn select_font(&self, name: &str) -> bool {
        let mut guard = self.ctx.borrow_mut();
        let ctx = &mut *guard;
        ctx.config.select_font(name, ctx.engine.fonts())
    }

    pub fn set_style(&self, index: usize) {
        self.ctx.borrow_mut().config.set_style(index);
    }

    pub fn reset(&self) {
        self.ctx.borrow_mut().config.reset();
    }

    /// Register a loaded font family and rebuild with it.
    pub fn add_font(
        &self,
        name: String,
        sample_text: String,
        styles: Vec<String>,
        css_families: Vec<String>,
        author: String,
        year: u16,
    ) {
        let mut ctx = self.ctx.borrow_mut();
        let mut fonts = ctx.engine.fonts().clone();
        fonts.insert(FontInfo {
            name,
            sample_text,
            styles,
            css_families,
            author,
            year,
        });
        ctx.engine.set_fonts(fonts);
    }

    /// Font names newest first, for the picker.
    pub fn font_names(&self) -> Vec<String> {
        let ctx = self.ctx.borrow();
        ctx.engine
            .fonts()
            .sorted_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn indicator_text(&self) -> String {
        let ctx = self.ctx.borrow();
        ctx.engine.perf().indicator_text(ctx.engine.grid().len())
    }
}
