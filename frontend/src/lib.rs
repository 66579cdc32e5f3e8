//! Browser entry point of the converter page.

mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use gfo_converter::{ColorConfig, ColorSlot, Controller, PageLocation, apply_color_overrides};
use tracing::{debug, error, info};
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, Window};

use crate::dom::{CONVERT_BUTTON_ID, DOWNLOAD_BUTTON_ID, DomView, element};

type Shared = Rc<RefCell<Controller<DomView>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Core notices (rejections, duplicates, rewrite failures) go to the
    // browser console.
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        debug!("waiting for DOMContentLoaded");
        let on_ready = Closure::once_into_js(move || {
            if let Err(e) = initialize(&window) {
                error!(error = ?e, "converter failed to initialize");
            }
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
        return Ok(());
    }

    initialize(&window)
}

/// Colors the hosting page declared as globals. Missing or non-string
/// globals count as empty.
fn page_colors(window: &Window) -> ColorConfig {
    let mut colors = ColorConfig::default();
    for slot in ColorSlot::ALL {
        let value = js_sys::Reflect::get(window, &JsValue::from_str(slot.constant()))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default();
        colors.set(slot, value);
    }
    colors
}

fn initialize(window: &Window) -> Result<(), JsValue> {
    let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
    let location = PageLocation::parse(&window.location().href()?)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let mut view = DomView::attach(document.clone())?;
    apply_color_overrides(&page_colors(window), &mut view);
    let input: EventTarget = view.input().clone().into();

    let controller: Shared = Rc::new(RefCell::new(Controller::new(view, location)));

    listen(&input, "input", &controller, |c| {
        c.validate_input();
    })?;
    listen(&element(&document, CONVERT_BUTTON_ID)?, "click", &controller, |c| {
        c.handle_convert();
    })?;
    listen(&element(&document, DOWNLOAD_BUTTON_ID)?, "click", &controller, |c| {
        c.handle_download();
    })?;

    info!("converter ready");
    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &str,
    controller: &Shared,
    action: fn(&mut Controller<DomView>),
) -> Result<(), JsValue> {
    let controller = Rc::clone(controller);
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
        action(&mut controller.borrow_mut());
    });
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    callback.forget();
    Ok(())
}
