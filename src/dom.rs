use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Size the canvas backing store to its container, one canvas pixel per CSS
/// pixel. Falls back to the canvas' own layout box when it has no parent.
pub fn fit_canvas_to_container(canvas: &web::HtmlCanvasElement) {
    let (w, h) = match canvas.parent_element() {
        Some(parent) => (parent.client_width(), parent.client_height()),
        None => {
            let rect = canvas.get_bounding_client_rect();
            (rect.width() as i32, rect.height() as i32)
        }
    };
    canvas.set_width(w.max(1) as u32);
    canvas.set_height(h.max(1) as u32);
}
