use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use catyarn_core::ScrollMetrics;

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";
const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn create_svg_element(document: &Document, tag: &str) -> Result<Element, JsValue> {
    document.create_element_ns(Some(SVG_NS), tag)
}

/// Current scroll offset, viewport height and document height.
pub fn scroll_metrics(window: &Window) -> ScrollMetrics {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_height = viewport_height(window);
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| f64::from(el.scroll_height()))
        .unwrap_or(viewport_height);
    ScrollMetrics::new(scroll_y, viewport_height, document_height)
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Whether the user asked the system to minimize non-essential motion.
pub fn prefers_reduced_motion(window: &Window) -> bool {
    match window.match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query.matches(),
        _ => false,
    }
}

/// Milliseconds on the same clock as animation-frame timestamps.
pub fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

pub fn set_attrs(el: &Element, attrs: &[(&str, &str)]) {
    for (name, value) in attrs {
        let _ = el.set_attribute(name, value);
    }
}
