//! Mobile menu toggle: `.menu-toggle` flips `.nav-links` between shown and
//! hidden via its inline `display` style.

use sitenav::core::menu::{MenuToggle, PanelDisplay};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

/// Wire the toggle. Returns `Ok(false)` when either element is missing.
pub(crate) fn bind_menu_toggle(document: &Document) -> Result<bool, JsValue> {
    let Some(button) = document.query_selector(".menu-toggle")? else {
        debug!("no .menu-toggle, menu left unbound");
        return Ok(false);
    };
    let Some(panel) = document.query_selector(".nav-links")? else {
        debug!("no .nav-links, menu left unbound");
        return Ok(false);
    };
    let panel: HtmlElement = panel.dyn_into()?;

    let callback = Closure::<dyn FnMut()>::new(move || {
        let style = panel.style();
        let current = style.get_property_value("display").unwrap_or_default();
        let mut toggle = MenuToggle::new(PanelDisplay::from_inline_style(&current));
        let next = toggle.toggle();
        if let Err(err) = style.set_property("display", next) {
            warn!(error = ?err, "menu toggle failed");
        }
    });
    button.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(true)
}
