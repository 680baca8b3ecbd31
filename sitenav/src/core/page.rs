//! Read-only view of the hosting page and mode selection.

use crate::core::config::SiteConfig;
use crate::core::types::Rect;

/// Geometry and environment signals the controller reads.
///
/// Implemented by the browser binding over `web-sys` and by the simulator.
pub trait Page {
    /// Current document scroll offset (`pageYOffset`).
    fn scroll_y(&self) -> f64;

    /// Viewport height (`innerHeight`).
    fn viewport_height(&self) -> f64;

    /// Viewport-relative rect of the element with this id, if present.
    fn section_rect(&self, anchor: &str) -> Option<Rect>;

    /// `prefers-reduced-motion: reduce`.
    fn prefers_reduced_motion(&self) -> bool;

    /// Monotonic wall clock in milliseconds.
    fn now_ms(&self) -> f64;

    fn has_element(&self, anchor: &str) -> bool {
        self.section_rect(anchor).is_some()
    }
}

/// Highlighter mode, fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageMode {
    /// Home document: passive tracking, click-to-scroll and hash navigation.
    Home,
    /// Any other document declaring its current page key.
    Subpage(String),
}

impl PageMode {
    /// Pick the mode from the URL path and the body's `data-current` value.
    ///
    /// A non-home document without `data-current` still runs in home mode.
    pub fn detect(config: &SiteConfig, pathname: &str, current: Option<&str>) -> Self {
        let name = document_name(pathname);
        let on_home = name.is_empty() || config.home_documents.iter().any(|doc| *doc == name);
        let current = current
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty());

        match current {
            Some(current) if !on_home => PageMode::Subpage(current),
            _ => PageMode::Home,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageMode::Home => "home",
            PageMode::Subpage(_) => "subpage",
        }
    }
}

/// Last path segment, lower-cased; an empty segment names `index.html`.
pub fn document_name(pathname: &str) -> String {
    match pathname.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment.to_lowercase(),
        _ => "index.html".to_string(),
    }
}
