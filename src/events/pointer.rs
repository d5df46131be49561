use crate::input::PointerInput;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Client coordinates to canvas pixels.
#[inline]
fn client_to_canvas(canvas: &web::HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x as f32 - rect.left() as f32;
    let y_css = client_y as f32 - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w > 0.0 && h > 0.0 {
        Vec2::new(
            x_css / w * canvas.width() as f32,
            y_css / h * canvas.height() as f32,
        )
    } else {
        Vec2::new(x_css, y_css)
    }
}

fn sync_touches(canvas: &web::HtmlCanvasElement, ev: &web::TouchEvent, input: &mut PointerInput) {
    let list = ev.touches();
    input.touches.clear();
    for i in 0..list.length() {
        if let Some(t) = list.get(i) {
            input
                .touches
                .push(client_to_canvas(canvas, t.client_x(), t.client_y()));
        }
    }
}

pub fn wire_pointer_handlers(canvas: &web::HtmlCanvasElement, pointer: Rc<RefCell<PointerInput>>) {
    wire_pointermove(canvas, pointer.clone());
    for kind in ["touchstart", "touchmove", "touchend", "touchcancel"] {
        wire_touch(canvas, kind, pointer.clone());
    }
}

fn wire_pointermove(canvas: &web::HtmlCanvasElement, pointer: Rc<RefCell<PointerInput>>) {
    let canvas_move = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let pos = client_to_canvas(&canvas_move, ev.client_x(), ev.client_y());
        pointer.borrow_mut().mouse = pos;
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_touch(canvas: &web::HtmlCanvasElement, kind: &str, pointer: Rc<RefCell<PointerInput>>) {
    let canvas_touch = canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        sync_touches(&canvas_touch, &ev, &mut pointer.borrow_mut());
        // keep the page from scrolling while dragging over the glyphs
        if ev.cancelable() {
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}
