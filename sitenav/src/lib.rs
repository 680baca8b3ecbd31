//! Navbar behavior for a static portfolio site: menu toggle, scroll-driven
//! link highlighting, click-to-scroll and hash deep-linking.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (mode selection, geometry,
//!   scroll planning, the highlighter state machine). No DOM, no I/O.
//! - **[`io`]**: File-backed config and scenario loading.
//! - **[`sim`]**: A headless page that executes core commands the way a
//!   browser would, for tests and the `sitenav simulate` command.
//!
//! The `sitenav-web` crate binds the same core to a real document.

pub mod core;
pub mod exit_codes;
pub mod io;
#[cfg(feature = "cli")]
pub mod logging;
pub mod sim;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::config::SiteConfig;
pub use crate::core::highlighter::NavHighlighter;
pub use crate::core::page::{Page, PageMode};
pub use crate::core::types::{Command, IntentSource, NavEvent, Rect};
