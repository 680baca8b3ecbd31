//! Deterministic, pure navigation logic.
//!
//! Core modules must be free of DOM access and I/O. They read the page
//! through the [`page::Page`] trait and return commands for a host to run,
//! which keeps every transition testable without a browser.

pub mod config;
pub mod fragment;
pub mod geometry;
pub mod highlighter;
pub mod menu;
pub mod page;
pub mod scroll;
pub mod sections;
pub mod types;
