//! Browser mount for the cat-and-yarn overlay.
//!
//! The host page calls `CatYarn.mount("overlay-root", { catSrc: ... })` and
//! keeps the returned handle; `unmount()` (or freeing the handle) removes the
//! overlay and releases every listener and pending animation frame.

pub mod bridge;
mod diag;
#[cfg(target_family = "wasm")]
mod dom;
#[cfg(target_family = "wasm")]
mod widget;

use wasm_bindgen::prelude::*;

/// WASM entry point.
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(target_family = "wasm")]
    console_error_panic_hook::set_once();
}

/// Handle to one mounted overlay.
#[wasm_bindgen]
pub struct CatYarn {
    #[cfg(target_family = "wasm")]
    widget: Option<std::rc::Rc<widget::Widget>>,
}

#[wasm_bindgen]
impl CatYarn {
    /// Mount the overlay as a child of the element with id `container_id`.
    pub fn mount(container_id: &str, config: JsValue) -> Result<CatYarn, JsValue> {
        mount_in(container_id, &config)
    }

    /// Remove the overlay. Safe to call more than once.
    pub fn unmount(&mut self) {
        #[cfg(target_family = "wasm")]
        if let Some(widget) = self.widget.take() {
            widget.unmount();
        }
    }

    /// Bounce the ball as if it had been clicked. Returns `false` when a
    /// bounce is already running or the overlay is unmounted.
    pub fn bounce(&self) -> bool {
        #[cfg(target_family = "wasm")]
        if let Some(widget) = &self.widget {
            return widget.bounce();
        }
        false
    }

    #[wasm_bindgen(getter)]
    pub fn bouncing(&self) -> bool {
        #[cfg(target_family = "wasm")]
        if let Some(widget) = &self.widget {
            return widget.is_bouncing();
        }
        false
    }
}

#[cfg(target_family = "wasm")]
fn mount_in(container_id: &str, config: &JsValue) -> Result<CatYarn, JsValue> {
    let config = bridge::config_from_js(config).map_err(|e| JsValue::from_str(&e))?;
    let window = dom::window()?;
    let document = dom::document(&window)?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {container_id}")))?;
    let widget = widget::Widget::mount(&container, config)?;
    Ok(CatYarn {
        widget: Some(widget),
    })
}

/// Stub for non-WASM targets (native check only).
#[cfg(not(target_family = "wasm"))]
fn mount_in(_container_id: &str, _config: &JsValue) -> Result<CatYarn, JsValue> {
    Ok(CatYarn {})
}

impl Drop for CatYarn {
    fn drop(&mut self) {
        self.unmount();
    }
}
