//! Test-only helpers for building simulated portfolio pages.

use crate::core::sections::default_sections;
use crate::sim::scenario::{LinkSpec, Scenario, SectionBox};

/// Height of every fixture section.
pub const SECTION_HEIGHT: f64 = 900.0;
pub const VIEWPORT_HEIGHT: f64 = 900.0;
/// Footer below the last section, so it can reach the navbar line.
pub const FOOTER_HEIGHT: f64 = 400.0;

/// Default sections stacked top to bottom, `SECTION_HEIGHT` each.
pub fn portfolio_sections() -> Vec<SectionBox> {
    default_sections()
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| SectionBox {
            id: entry.id,
            top: idx as f64 * SECTION_HEIGHT,
            height: SECTION_HEIGHT,
        })
        .collect()
}

/// One `#anchor` link per default section.
pub fn portfolio_links() -> Vec<LinkSpec> {
    default_sections()
        .into_iter()
        .map(|entry| LinkSpec {
            section: entry.key,
            href: format!("#{}", entry.id),
        })
        .collect()
}

/// Document-relative top of a fixture section.
pub fn section_top(id: &str) -> f64 {
    portfolio_sections()
        .into_iter()
        .find(|section| section.id == id)
        .map(|section| section.top)
        .unwrap_or_else(|| panic!("no fixture section '{}'", id))
}

/// Home document with the full portfolio layout, no inputs.
pub fn home_scenario() -> Scenario {
    let sections = portfolio_sections();
    let document_height = sections.len() as f64 * SECTION_HEIGHT + FOOTER_HEIGHT;
    Scenario {
        pathname: "/index.html".to_string(),
        current: None,
        fragment: None,
        viewport_height: VIEWPORT_HEIGHT,
        document_height,
        reduced_motion: false,
        initial_scroll_y: 0.0,
        frame_ms: 16.0,
        sections,
        links: portfolio_links(),
        menu_display: Some(String::new()),
        events: Vec::new(),
        run_until_ms: 2_000.0,
    }
}

/// A subpage declaring `current` via `data-current`.
pub fn subpage_scenario(pathname: &str, current: &str) -> Scenario {
    Scenario {
        pathname: pathname.to_string(),
        current: Some(current.to_string()),
        ..home_scenario()
    }
}
