//! In-memory page that executes highlighter commands like a browser would.

use tracing::trace;

use crate::core::page::Page;
use crate::core::types::{Command, Rect};
use crate::sim::scenario::{LinkSpec, Scenario, SectionBox};

/// A simulated `.nav-link`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimLink {
    /// `data-section`, lower-cased.
    pub section: String,
    pub href: String,
    pub active: bool,
    pub pulsing: bool,
}

impl From<&LinkSpec> for SimLink {
    fn from(spec: &LinkSpec) -> Self {
        Self {
            section: spec.section.to_lowercase(),
            href: spec.href.clone(),
            active: false,
            pulsing: false,
        }
    }
}

/// Pending removal of the pulse marker.
#[derive(Debug, Clone, PartialEq)]
struct PulseTimer {
    due_ms: f64,
    key: String,
}

#[derive(Debug, Clone)]
pub struct SimPage {
    now_ms: f64,
    scroll_y: f64,
    viewport_height: f64,
    document_height: f64,
    reduced_motion: bool,
    sections: Vec<SectionBox>,
    links: Vec<SimLink>,
    fragment: Option<String>,
    history: Vec<String>,
    listening: bool,
    frame_requested: bool,
    scroll_event_pending: bool,
    timers: Vec<PulseTimer>,
    /// Every effective programmatic scroll, in order.
    scroll_writes: Vec<f64>,
}

impl SimPage {
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut page = Self {
            now_ms: 0.0,
            scroll_y: 0.0,
            viewport_height: scenario.viewport_height,
            document_height: scenario.document_height,
            reduced_motion: scenario.reduced_motion,
            sections: scenario.sections.clone(),
            links: scenario.links.iter().map(SimLink::from).collect(),
            fragment: scenario
                .fragment
                .as_deref()
                .map(normalize_fragment)
                .filter(|fragment| fragment.len() > 1),
            history: Vec::new(),
            listening: false,
            frame_requested: false,
            scroll_event_pending: false,
            timers: Vec::new(),
            scroll_writes: Vec::new(),
        };
        page.scroll_y = page.clamp_scroll(scenario.initial_scroll_y);
        page
    }

    pub fn set_now(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    fn clamp_scroll(&self, y: f64) -> f64 {
        y.clamp(0.0, self.max_scroll())
    }

    /// Scroll like `window.scrollTo`: clamp, and queue a scroll event if the
    /// offset actually changed.
    pub fn scroll_to(&mut self, y: f64) -> bool {
        let y = self.clamp_scroll(y);
        if y == self.scroll_y {
            return false;
        }
        self.scroll_y = y;
        self.scroll_event_pending = true;
        true
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
        self.scroll_y = self.clamp_scroll(self.scroll_y);
    }

    pub fn set_fragment(&mut self, fragment: &str) {
        let fragment = normalize_fragment(fragment);
        self.fragment = if fragment.len() > 1 {
            Some(fragment)
        } else {
            None
        };
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn links(&self) -> &[SimLink] {
        &self.links
    }

    /// Sections of every link currently marked active.
    pub fn active_links(&self) -> Vec<String> {
        self.links
            .iter()
            .filter(|link| link.active)
            .map(|link| link.section.clone())
            .collect()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn scroll_writes(&self) -> &[f64] {
        &self.scroll_writes
    }

    pub fn take_frame_request(&mut self) -> bool {
        std::mem::take(&mut self.frame_requested)
    }

    pub fn take_scroll_event(&mut self) -> bool {
        std::mem::take(&mut self.scroll_event_pending)
    }

    pub fn next_timer_due(&self) -> Option<f64> {
        self.timers.iter().map(|timer| timer.due_ms).reduce(f64::min)
    }

    /// Fire every pulse timer due at or before `now_ms`.
    pub fn fire_timers(&mut self, now_ms: f64) {
        let (due, pending): (Vec<_>, Vec<_>) = self
            .timers
            .drain(..)
            .partition(|timer| timer.due_ms <= now_ms);
        self.timers = pending;
        for timer in due {
            for link in self.links.iter_mut().filter(|link| link.section == timer.key) {
                link.pulsing = false;
            }
        }
    }

    pub fn execute(&mut self, command: &Command) {
        trace!(?command, now_ms = self.now_ms, "execute");
        match command {
            Command::SetActive(key) => {
                for link in &mut self.links {
                    link.active = link.section == *key;
                }
            }
            Command::ClearPulse(key) => {
                for link in self.links.iter_mut().filter(|link| link.section == *key) {
                    link.pulsing = false;
                }
            }
            Command::AddPulse {
                key,
                clear_after_ms,
            } => {
                for link in self.links.iter_mut().filter(|link| link.section == *key) {
                    link.pulsing = true;
                }
                self.timers.push(PulseTimer {
                    due_ms: self.now_ms + f64::from(*clear_after_ms),
                    key: key.clone(),
                });
            }
            Command::ScrollTo(y) => {
                if self.scroll_to(*y) {
                    self.scroll_writes.push(self.scroll_y);
                }
            }
            Command::PushHistory(fragment) => {
                self.history.push(fragment.clone());
                self.set_fragment(fragment);
            }
            Command::ListenForUserScroll(listen) => self.listening = *listen,
            Command::RequestFrame => self.frame_requested = true,
        }
    }
}

impl Page for SimPage {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn section_rect(&self, anchor: &str) -> Option<Rect> {
        self.sections
            .iter()
            .find(|section| section.id == anchor)
            .map(|section| Rect::new(section.top - self.scroll_y, section.height))
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

fn normalize_fragment(fragment: &str) -> String {
    if fragment.starts_with('#') {
        fragment.to_string()
    } else {
        format!("#{}", fragment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario {
            pathname: "/index.html".to_string(),
            current: None,
            fragment: None,
            viewport_height: 800.0,
            document_height: 2000.0,
            reduced_motion: false,
            initial_scroll_y: 5000.0,
            frame_ms: 16.0,
            sections: vec![SectionBox {
                id: "about".to_string(),
                top: 900.0,
                height: 400.0,
            }],
            links: vec![LinkSpec {
                section: "About".to_string(),
                href: "#about".to_string(),
            }],
            menu_display: None,
            events: Vec::new(),
            run_until_ms: 100.0,
        }
    }

    #[test]
    fn scroll_is_clamped_and_only_changes_fire_events() {
        let mut page = SimPage::from_scenario(&scenario());
        assert_eq!(page.scroll_y(), 1200.0);
        assert!(!page.scroll_to(9999.0));
        assert!(page.scroll_to(-50.0));
        assert_eq!(page.scroll_y(), 0.0);
        assert!(page.take_scroll_event());
        assert!(!page.take_scroll_event());
    }

    #[test]
    fn rects_are_viewport_relative() {
        let mut page = SimPage::from_scenario(&scenario());
        page.scroll_to(100.0);
        assert_eq!(page.section_rect("about"), Some(Rect::new(800.0, 400.0)));
        assert_eq!(page.section_rect("missing"), None);
    }

    #[test]
    fn pulse_marker_clears_when_timer_fires() {
        let mut page = SimPage::from_scenario(&scenario());
        page.execute(&Command::SetActive("about".to_string()));
        page.execute(&Command::AddPulse {
            key: "about".to_string(),
            clear_after_ms: 400,
        });
        assert!(page.links()[0].active);
        assert!(page.links()[0].pulsing);
        assert_eq!(page.next_timer_due(), Some(400.0));

        page.fire_timers(399.0);
        assert!(page.links()[0].pulsing);
        page.fire_timers(400.0);
        assert!(!page.links()[0].pulsing);
        assert_eq!(page.next_timer_due(), None);
    }
}
