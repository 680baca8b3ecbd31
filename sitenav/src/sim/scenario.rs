//! Scenario description for the headless simulator.
//!
//! A scenario is a page layout plus a list of timed user inputs. It is the
//! JSON document accepted by `sitenav simulate`.

use serde::{Deserialize, Serialize};

fn default_pathname() -> String {
    "/index.html".to_string()
}

fn default_frame_ms() -> f64 {
    16.0
}

fn default_run_until_ms() -> f64 {
    2_000.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// URL path of the document (`/index.html`, `/leadership.html`).
    #[serde(default = "default_pathname")]
    pub pathname: String,

    /// Body `data-current` attribute.
    #[serde(default)]
    pub current: Option<String>,

    /// URL fragment at load time, with or without `#`.
    #[serde(default)]
    pub fragment: Option<String>,

    pub viewport_height: f64,
    pub document_height: f64,

    #[serde(default)]
    pub reduced_motion: bool,

    #[serde(default)]
    pub initial_scroll_y: f64,

    /// Interval between rendering opportunities.
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,

    /// Anchorable elements, document-relative.
    pub sections: Vec<SectionBox>,

    #[serde(default)]
    pub links: Vec<LinkSpec>,

    /// Inline `display` of the nav-links panel; absent means the page has no
    /// menu toggle at all.
    #[serde(default)]
    pub menu_display: Option<String>,

    #[serde(default)]
    pub events: Vec<TimedInput>,

    #[serde(default = "default_run_until_ms")]
    pub run_until_ms: f64,
}

/// An element with an id, positioned in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// A `.nav-link`: its `data-section` and `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub section: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedInput {
    pub at_ms: f64,
    #[serde(flatten)]
    pub input: Input,
}

/// A user or browser action injected at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Input {
    /// Click on a link with this `href`.
    Click { href: String },
    /// User scrolled the document to `y`.
    Scroll { y: f64 },
    Resize { viewport_height: f64 },
    Wheel,
    Key {
        code: String,
        #[serde(default)]
        key: String,
    },
    Touch,
    /// Back/forward navigation landing on `fragment`.
    HashChange { fragment: String },
    MenuToggle,
}
