pub mod pointer;

pub use pointer::*;

use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep the canvas matched to its container. The engine notices the new size
/// on its next tick and rebuilds the grid.
pub fn wire_resize(canvas: &web::HtmlCanvasElement) {
    let canvas_resize = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::fit_canvas_to_container(&canvas_resize);
        log::info!(
            "[web] canvas resized to {}x{}",
            canvas_resize.width(),
            canvas_resize.height()
        );
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
