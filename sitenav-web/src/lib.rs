//! Browser binding for the sitenav highlighter.
//!
//! Loaded as a wasm module by every page of the site. On start it waits for
//! the document to finish parsing, then wires the mobile menu toggle and the
//! navbar highlighter to the live DOM. All decisions come from
//! [`sitenav::NavHighlighter`]; this crate only forwards DOM events and
//! executes the returned commands.

// `#[wasm_bindgen]` exports expand to unsafe shims.
#![cfg_attr(target_arch = "wasm32", allow(unsafe_code))]

pub mod config;

#[cfg(target_arch = "wasm32")]
mod dom_page;
#[cfg(target_arch = "wasm32")]
mod menu;
#[cfg(target_arch = "wasm32")]
mod runtime;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    if let Err(err) = runtime::when_ready() {
        tracing::warn!(error = ?err, "sitenav failed to start");
    }
}
