//! Event wiring and command execution for the live document.
//!
//! The controller lives in a thread-local slot. Every DOM callback borrows
//! it just long enough to compute commands, releases the borrow, then runs
//! the commands, so no callback can observe a half-applied transition.

use std::cell::RefCell;

use sitenav::core::fragment::anchor_from_href;
use sitenav::{Command, IntentSource, NavEvent, NavHighlighter, PageMode};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, KeyboardEvent, Window,
};

use crate::config::{CONFIG_ELEMENT_ID, page_config};
use crate::dom_page::DomPage;
use crate::menu::bind_menu_toggle;

const ACTIVE_CLASS: &str = "active";
const PULSE_CLASS: &str = "just-activated";

type EventCallback = Closure<dyn FnMut(Event)>;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

struct Runtime {
    controller: NavHighlighter,
    page: DomPage,
    /// `.nav-link` elements with their lower-cased `data-section`.
    links: Vec<(Element, String)>,
    listening: bool,
    on_frame: Closure<dyn FnMut(f64)>,
    /// `(event type, callback)` pairs attached only while a programmatic
    /// scroll is in flight.
    intent_listeners: Vec<(&'static str, EventCallback)>,
}

/// Mount now if the document is parsed, otherwise on `DOMContentLoaded`.
pub(crate) fn when_ready() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != "loading" {
        return mount(window, document);
    }

    let target = document.clone();
    let callback = Closure::once_into_js(move || {
        if let Err(err) = mount(window, document) {
            warn!(error = ?err, "sitenav mount failed");
        }
    });
    target.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    Ok(())
}

fn mount(window: Window, document: Document) -> Result<(), JsValue> {
    match bind_menu_toggle(&document) {
        Ok(bound) => debug!(bound, "menu toggle"),
        Err(err) => warn!(error = ?err, "menu toggle not bound"),
    }

    let Some(navbar) = document.query_selector(".navbar")? else {
        debug!("no .navbar, highlighter disabled");
        return Ok(());
    };
    let links = collect_links(&navbar)?;

    let embedded = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let config = page_config(embedded.as_deref());

    let location = window.location();
    let pathname = location.pathname()?;
    let current = document
        .body()
        .and_then(|body| body.get_attribute("data-current"));
    let mode = PageMode::detect(&config, &pathname, current.as_deref());

    let page = DomPage::new(window.clone(), document.clone());
    let controller = NavHighlighter::new(config, mode.clone());
    info!(mode = mode.label(), links = links.len(), "sitenav mounted");

    if mode == PageMode::Home {
        bind_link_clicks(&controller, &page, &links, &location.href()?)?;
        bind_page_listeners(&window)?;
    }

    let on_frame = Closure::<dyn FnMut(f64)>::new(|_timestamp: f64| dispatch(NavEvent::Frame));
    let intent_listeners = intent_listeners();
    RUNTIME.with(|slot| {
        *slot.borrow_mut() = Some(Runtime {
            controller,
            page,
            links,
            listening: false,
            on_frame,
            intent_listeners,
        });
    });

    let hash = location.hash()?;
    let fragment = if hash.is_empty() { None } else { Some(hash) };
    dispatch(NavEvent::Load { fragment });
    Ok(())
}

fn collect_links(navbar: &Element) -> Result<Vec<(Element, String)>, JsValue> {
    let nodes = navbar.query_selector_all(".nav-link")?;
    let mut links = Vec::with_capacity(nodes.length() as usize);
    for idx in 0..nodes.length() {
        let Some(element) = nodes.item(idx).and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let section = element
            .get_attribute("data-section")
            .unwrap_or_default()
            .to_lowercase();
        links.push((element, section));
    }
    Ok(links)
}

/// Intercept clicks on links whose target section exists on this page.
fn bind_link_clicks(
    controller: &NavHighlighter,
    page: &DomPage,
    links: &[(Element, String)],
    base: &str,
) -> Result<(), JsValue> {
    for (link, _) in links {
        let Some(href) = link.get_attribute("href") else {
            continue;
        };
        let Some(anchor) = anchor_from_href(&href, base) else {
            continue;
        };
        if !controller.intercepts(page, &anchor) {
            continue;
        }
        let callback = EventCallback::new(move |event: Event| {
            event.prevent_default();
            dispatch(NavEvent::Click {
                anchor: anchor.clone(),
            });
        });
        link.add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
        callback.forget();
    }
    Ok(())
}

fn bind_page_listeners(window: &Window) -> Result<(), JsValue> {
    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);

    let on_scroll = EventCallback::new(|_event: Event| dispatch(NavEvent::Scroll));
    window.add_event_listener_with_callback_and_add_event_listener_options(
        "scroll",
        on_scroll.as_ref().unchecked_ref(),
        &passive,
    )?;
    on_scroll.forget();

    let on_resize = EventCallback::new(|_event: Event| dispatch(NavEvent::Resize));
    window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    on_resize.forget();

    let on_hash = EventCallback::new(|_event: Event| {
        let fragment = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();
        dispatch(NavEvent::HashChange { fragment });
    });
    window.add_event_listener_with_callback("hashchange", on_hash.as_ref().unchecked_ref())?;
    on_hash.forget();
    Ok(())
}

fn intent_listeners() -> Vec<(&'static str, EventCallback)> {
    let wheel = EventCallback::new(|_event: Event| {
        dispatch(NavEvent::UserScrollIntent(IntentSource::Wheel));
    });
    let touch = EventCallback::new(|_event: Event| {
        dispatch(NavEvent::UserScrollIntent(IntentSource::Touch));
    });
    let key = EventCallback::new(|event: Event| {
        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        if let Some(source) = IntentSource::from_key(&event.code(), &event.key()) {
            dispatch(NavEvent::UserScrollIntent(source));
        }
    });
    vec![("wheel", wheel), ("touchstart", touch), ("keydown", key)]
}

/// Feed one event to the controller and run what it returns.
fn dispatch(event: NavEvent) {
    let commands = RUNTIME.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.as_mut() {
            Some(runtime) => runtime.controller.handle(&runtime.page, event),
            None => Vec::new(),
        }
    });
    for command in &commands {
        RUNTIME.with(|slot| {
            let mut slot = slot.borrow_mut();
            let Some(runtime) = slot.as_mut() else {
                return;
            };
            if let Err(err) = runtime.execute(command) {
                warn!(?command, error = ?err, "command failed");
            }
        });
    }
}

impl Runtime {
    fn execute(&mut self, command: &Command) -> Result<(), JsValue> {
        match command {
            Command::SetActive(key) => {
                for (link, section) in &self.links {
                    link.class_list()
                        .toggle_with_force(ACTIVE_CLASS, section == key)?;
                }
            }
            Command::ClearPulse(key) => {
                for link in self.links_for(key) {
                    link.class_list().remove_1(PULSE_CLASS)?;
                }
            }
            Command::AddPulse {
                key,
                clear_after_ms,
            } => {
                let targets: Vec<Element> = self.links_for(key).cloned().collect();
                for link in &targets {
                    link.class_list().add_1(PULSE_CLASS)?;
                }
                let clear = Closure::once_into_js(move || {
                    for link in &targets {
                        let _ = link.class_list().remove_1(PULSE_CLASS);
                    }
                });
                self.page
                    .window()
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        clear.unchecked_ref(),
                        i32::try_from(*clear_after_ms).unwrap_or(i32::MAX),
                    )?;
            }
            Command::ScrollTo(y) => self.page.window().scroll_to_with_x_and_y(0.0, *y),
            Command::PushHistory(fragment) => {
                self.page
                    .window()
                    .history()?
                    .push_state_with_url(&JsValue::NULL, "", Some(fragment.as_str()))?;
            }
            Command::ListenForUserScroll(listen) => self.set_listening(*listen)?,
            Command::RequestFrame => {
                self.page
                    .window()
                    .request_animation_frame(self.on_frame.as_ref().unchecked_ref())?;
            }
        }
        Ok(())
    }

    fn links_for<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.links
            .iter()
            .filter(move |(_, section)| section == key)
            .map(|(link, _)| link)
    }

    fn set_listening(&mut self, listen: bool) -> Result<(), JsValue> {
        if listen == self.listening {
            return Ok(());
        }
        let window = self.page.window();
        for (event_type, callback) in &self.intent_listeners {
            let function = callback.as_ref().unchecked_ref();
            if listen {
                let passive = AddEventListenerOptions::new();
                passive.set_passive(true);
                window.add_event_listener_with_callback_and_add_event_listener_options(
                    event_type, function, &passive,
                )?;
            } else {
                window.remove_event_listener_with_callback(event_type, function)?;
            }
        }
        self.listening = listen;
        Ok(())
    }
}
