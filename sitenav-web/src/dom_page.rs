//! [`Page`] over the live document.

use sitenav::{Page, Rect};
use web_sys::{Document, Window};

const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

pub(crate) struct DomPage {
    window: Window,
    document: Document,
    /// Sampled once at mount, like the stylesheet's media query.
    reduced_motion: bool,
}

impl DomPage {
    pub(crate) fn new(window: Window, document: Document) -> Self {
        let reduced_motion = window
            .match_media(REDUCED_MOTION_QUERY)
            .ok()
            .flatten()
            .is_some_and(|query| query.matches());
        Self {
            window,
            document,
            reduced_motion,
        }
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }
}

impl Page for DomPage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    fn section_rect(&self, anchor: &str) -> Option<Rect> {
        let element = self.document.get_element_by_id(anchor)?;
        let rect = element.get_bounding_client_rect();
        Some(Rect::new(rect.top(), rect.height()))
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or(0.0)
    }
}
