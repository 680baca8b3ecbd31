//! Shared deterministic types for the navigation core.
//!
//! Events flow from a host into the controller; commands flow back out. Both
//! are plain data so the same controller runs against the real DOM and the
//! headless simulator.

use serde::{Deserialize, Serialize};

/// Vertical extent of an element relative to the viewport (like
/// `getBoundingClientRect`, restricted to the axis we track).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Vertical center, in the same coordinate space as `top`.
    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Kind of user input that signals the user wants to take over scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentSource {
    Wheel,
    Key,
    Touch,
}

/// `KeyboardEvent.code` values that scroll the page.
const SCROLL_KEY_CODES: [&str; 7] = [
    "PageUp",
    "PageDown",
    "Home",
    "End",
    "ArrowUp",
    "ArrowDown",
    "Space",
];

impl IntentSource {
    /// Classify a keydown by its `code` and `key` values.
    ///
    /// Returns `None` for keys that do not scroll.
    pub fn from_key(code: &str, key: &str) -> Option<Self> {
        if SCROLL_KEY_CODES.contains(&code) || key == " " {
            Some(Self::Key)
        } else {
            None
        }
    }
}

/// Inbound event fed into [`crate::core::highlighter::NavHighlighter::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// Document finished loading; `fragment` is the URL hash, if any.
    Load { fragment: Option<String> },
    /// A nav link targeting `anchor` (a DOM id, without `#`) was clicked.
    Click { anchor: String },
    /// The document scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
    /// History navigation changed the URL fragment.
    HashChange { fragment: String },
    /// Wheel, scrolling key or touch start while a listener was bound.
    UserScrollIntent(IntentSource),
    /// Animation-frame callback requested through [`Command::RequestFrame`].
    Frame,
}

/// Outbound instruction for the host, executed in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Mark every link whose lower-cased section equals the key active and
    /// every other link inactive.
    SetActive(String),
    /// Drop the pulse marker from links with this key.
    ClearPulse(String),
    /// Add the pulse marker to links with this key and remove it again after
    /// `clear_after_ms`.
    AddPulse { key: String, clear_after_ms: u32 },
    /// Scroll the document so its vertical offset becomes `y`.
    ScrollTo(f64),
    /// Push `fragment` (with leading `#`) onto history without reloading.
    PushHistory(String),
    /// Bind (`true`) or unbind (`false`) the wheel/key/touch cancel listeners.
    ListenForUserScroll(bool),
    /// Deliver [`NavEvent::Frame`] on the next animation frame.
    RequestFrame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_keys_are_recognized_by_code_or_space_key() {
        assert_eq!(IntentSource::from_key("PageDown", ""), Some(IntentSource::Key));
        assert_eq!(IntentSource::from_key("ArrowUp", "ArrowUp"), Some(IntentSource::Key));
        assert_eq!(IntentSource::from_key("", " "), Some(IntentSource::Key));
        assert_eq!(IntentSource::from_key("KeyA", "a"), None);
        assert_eq!(IntentSource::from_key("ArrowLeft", "ArrowLeft"), None);
    }

    #[test]
    fn rect_center_is_midpoint() {
        assert_eq!(Rect::new(100.0, 50.0).center(), 125.0);
    }
}
