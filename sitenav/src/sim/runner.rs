//! Deterministic event loop driving a [`NavHighlighter`] against a [`SimPage`].
//!
//! Each rendering opportunity (every `frame_ms`) first delivers a pending
//! scroll event, then the requested animation frame, matching the order a
//! browser runs scroll steps before animation-frame callbacks. Inputs due at
//! the same instant run before timers, timers before the frame.

use serde::Serialize;
use tracing::{debug, info};

use crate::core::config::SiteConfig;
use crate::core::fragment::anchor_from_href;
use crate::core::highlighter::NavHighlighter;
use crate::core::menu::{MenuToggle, PanelDisplay};
use crate::core::page::{Page, PageMode};
use crate::core::types::{Command, IntentSource, NavEvent};
use crate::sim::page::SimPage;
use crate::sim::scenario::{Input, Scenario, TimedInput};

const SIM_ORIGIN: &str = "https://site.invalid";

/// A `SetActive` published by the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveChange {
    pub at_ms: f64,
    pub key: String,
}

/// Observable end state of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub mode: String,
    pub ended_at_ms: f64,
    pub scroll_y: f64,
    pub active: Option<String>,
    pub active_links: Vec<String>,
    pub fragment: Option<String>,
    pub history: Vec<String>,
    pub menu_display: Option<String>,
    /// Hrefs the simulated browser would have followed (not intercepted).
    pub navigations: Vec<String>,
    pub timeline: Vec<ActiveChange>,
}

pub struct Simulation {
    controller: NavHighlighter,
    page: SimPage,
    menu: Option<MenuToggle>,
    base_url: String,
    frame_ms: f64,
    next_frame_ms: f64,
    now_ms: f64,
    inputs: Vec<TimedInput>,
    next_input: usize,
    navigations: Vec<String>,
    timeline: Vec<ActiveChange>,
}

impl Simulation {
    /// Build the page, pick the mode and deliver the load event at t=0.
    pub fn new(config: SiteConfig, scenario: &Scenario) -> Self {
        let mode = PageMode::detect(&config, &scenario.pathname, scenario.current.as_deref());
        info!(mode = mode.label(), pathname = %scenario.pathname, "simulation start");

        let mut inputs = scenario.events.clone();
        inputs.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

        let frame_ms = if scenario.frame_ms > 0.0 {
            scenario.frame_ms
        } else {
            16.0
        };

        let mut sim = Self {
            controller: NavHighlighter::new(config, mode),
            page: SimPage::from_scenario(scenario),
            menu: scenario
                .menu_display
                .as_deref()
                .map(|display| MenuToggle::new(PanelDisplay::from_inline_style(display))),
            base_url: format!("{}{}", SIM_ORIGIN, scenario.pathname),
            frame_ms,
            next_frame_ms: frame_ms,
            now_ms: 0.0,
            inputs,
            next_input: 0,
            navigations: Vec::new(),
            timeline: Vec::new(),
        };
        let fragment = sim.page.fragment().map(str::to_string);
        sim.dispatch(NavEvent::Load { fragment });
        sim
    }

    pub fn controller(&self) -> &NavHighlighter {
        &self.controller
    }

    pub fn page(&self) -> &SimPage {
        &self.page
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Queue an input at an absolute time (not before the current time).
    pub fn schedule(&mut self, at_ms: f64, input: Input) {
        let at_ms = at_ms.max(self.now_ms);
        let pos = self.inputs[self.next_input..]
            .iter()
            .position(|queued| queued.at_ms > at_ms)
            .map_or(self.inputs.len(), |offset| self.next_input + offset);
        self.inputs.insert(pos, TimedInput { at_ms, input });
    }

    /// Advance virtual time, processing everything due up to `until_ms`.
    pub fn run_until(&mut self, until_ms: f64) {
        loop {
            let next_input = self.inputs.get(self.next_input).map(|input| input.at_ms);
            let next_timer = self.page.next_timer_due();
            let next = [next_input, next_timer, Some(self.next_frame_ms)]
                .into_iter()
                .flatten()
                .reduce(f64::min)
                .unwrap_or(self.next_frame_ms);
            if next > until_ms {
                break;
            }
            self.advance_to(next);

            if next_input == Some(next) {
                let input = self.inputs[self.next_input].input.clone();
                self.next_input += 1;
                self.apply_input(input);
            } else if next_timer == Some(next) {
                self.page.fire_timers(next);
            } else {
                self.next_frame_ms += self.frame_ms;
                self.render_frame();
            }
        }
        self.advance_to(until_ms);
    }

    pub fn report(&self) -> Report {
        Report {
            mode: self.controller.mode().label().to_string(),
            ended_at_ms: self.now_ms,
            scroll_y: self.page.scroll_y(),
            active: self.controller.state().active().map(str::to_string),
            active_links: self.page.active_links(),
            fragment: self.page.fragment().map(str::to_string),
            history: self.page.history().to_vec(),
            menu_display: self.menu.map(|menu| menu.display().as_css().to_string()),
            navigations: self.navigations.clone(),
            timeline: self.timeline.clone(),
        }
    }

    fn advance_to(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
            self.page.set_now(now_ms);
        }
    }

    fn render_frame(&mut self) {
        if self.page.take_scroll_event() {
            self.dispatch(NavEvent::Scroll);
        }
        if self.page.take_frame_request() {
            self.dispatch(NavEvent::Frame);
        }
    }

    fn apply_input(&mut self, input: Input) {
        debug!(at_ms = self.now_ms, ?input, "input");
        match input {
            Input::Click { href } => {
                let intercepted = anchor_from_href(&href, &self.base_url)
                    .filter(|anchor| self.controller.intercepts(&self.page, anchor));
                match intercepted {
                    Some(anchor) => self.dispatch(NavEvent::Click { anchor }),
                    None => self.navigations.push(href),
                }
            }
            Input::Scroll { y } => {
                self.page.scroll_to(y);
            }
            Input::Resize { viewport_height } => {
                self.page.set_viewport_height(viewport_height);
                self.dispatch(NavEvent::Resize);
            }
            Input::Wheel => self.user_intent(IntentSource::Wheel),
            Input::Touch => self.user_intent(IntentSource::Touch),
            Input::Key { code, key } => {
                if let Some(source) = IntentSource::from_key(&code, &key) {
                    self.user_intent(source);
                }
            }
            Input::HashChange { fragment } => {
                self.page.set_fragment(&fragment);
                self.dispatch(NavEvent::HashChange { fragment });
            }
            Input::MenuToggle => {
                if let Some(menu) = self.menu.as_mut() {
                    menu.toggle();
                }
            }
        }
    }

    /// Cancel listeners exist only while an animation is in flight.
    fn user_intent(&mut self, source: IntentSource) {
        if self.page.is_listening() {
            self.dispatch(NavEvent::UserScrollIntent(source));
        }
    }

    fn dispatch(&mut self, event: NavEvent) {
        let commands = self.controller.handle(&self.page, event);
        for command in &commands {
            if let Command::SetActive(key) = command {
                self.timeline.push(ActiveChange {
                    at_ms: self.now_ms,
                    key: key.clone(),
                });
            }
            self.page.execute(command);
        }
    }
}

/// Run a scenario to its `run_until_ms` and report.
pub fn simulate(config: SiteConfig, scenario: &Scenario) -> Report {
    let mut sim = Simulation::new(config, scenario);
    sim.run_until(scenario.run_until_ms);
    sim.report()
}
