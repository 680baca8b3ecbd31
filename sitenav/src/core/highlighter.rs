//! Navbar link highlighter: the controller and its transition function.
//!
//! In home mode two things can drive the active link: passive tracking (the
//! section closest to the viewport center) and a programmatic-scroll lock set
//! by a click or hash navigation. The lock always wins; passive recomputation
//! is skipped while it is held. The lock and the single in-flight animation
//! live in [`HighlighterState`] and are only touched through controller
//! methods.

use tracing::{debug, trace};

use crate::core::config::SiteConfig;
use crate::core::fragment::anchor_from_hash;
use crate::core::geometry::{closest_section, target_offset};
use crate::core::page::{Page, PageMode};
use crate::core::scroll::{ScrollAnimation, ScrollPlan, plan_scroll};
use crate::core::sections::SectionMap;
use crate::core::types::{Command, NavEvent};

/// How a key became active. Explicit activations always re-pulse the link;
/// tracked ones only when the key changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Activation {
    Explicit,
    Tracked,
}

/// Mutable highlighter state. Single owner: [`NavHighlighter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlighterState {
    /// Key locked by a programmatic scroll.
    lock: Option<String>,
    /// The one in-flight animation.
    animation: Option<ScrollAnimation>,
    /// Last key published through `SetActive`.
    active: Option<String>,
    /// A scroll/resize arrived since the last frame.
    recompute_pending: bool,
    /// Key whose pulse marker is re-added on the next frame.
    pulse_pending: Option<String>,
    /// A hash jump holds the lock until the next frame.
    release_lock_on_frame: bool,
    /// A `RequestFrame` is outstanding.
    frame_requested: bool,
}

impl HighlighterState {
    pub fn lock(&self) -> Option<&str> {
        self.lock.as_deref()
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn animation(&self) -> Option<&ScrollAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }
}

/// Controller for one page. Feed it [`NavEvent`]s; execute the returned
/// [`Command`]s in order.
#[derive(Debug, Clone)]
pub struct NavHighlighter {
    config: SiteConfig,
    sections: SectionMap,
    mode: PageMode,
    state: HighlighterState,
}

impl NavHighlighter {
    pub fn new(config: SiteConfig, mode: PageMode) -> Self {
        let sections = config.section_map();
        Self {
            config,
            sections,
            mode,
            state: HighlighterState::default(),
        }
    }

    pub fn mode(&self) -> &PageMode {
        &self.mode
    }

    pub fn state(&self) -> &HighlighterState {
        &self.state
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Whether a click on a link targeting `anchor` should be intercepted.
    ///
    /// Only home mode intercepts, and only for anchors present on the page;
    /// every other link keeps its default navigation.
    pub fn intercepts<P: Page + ?Sized>(&self, page: &P, anchor: &str) -> bool {
        self.mode == PageMode::Home && page.has_element(anchor)
    }

    /// Single transition function.
    pub fn handle<P: Page + ?Sized>(&mut self, page: &P, event: NavEvent) -> Vec<Command> {
        trace!(?event, mode = self.mode.label(), "nav event");
        let mut out = Vec::new();
        match self.mode.clone() {
            PageMode::Subpage(current) => self.handle_subpage(&current, event, &mut out),
            PageMode::Home => self.handle_home(page, event, &mut out),
        }
        out
    }

    fn handle_subpage(&mut self, current: &str, event: NavEvent, out: &mut Vec<Command>) {
        match event {
            NavEvent::Load { .. } => self.activate(current, Activation::Explicit, out),
            NavEvent::Frame => {
                self.state.frame_requested = false;
                self.flush_pulse(out);
            }
            _ => {}
        }
    }

    fn handle_home<P: Page + ?Sized>(
        &mut self,
        page: &P,
        event: NavEvent,
        out: &mut Vec<Command>,
    ) {
        match event {
            NavEvent::Load { fragment } => match fragment {
                Some(fragment) if !anchor_from_hash(&fragment).is_empty() => {
                    self.go_to_hash(page, &fragment, out);
                }
                _ => self.update_on_scroll(page, out),
            },
            NavEvent::HashChange { fragment } => self.go_to_hash(page, &fragment, out),
            NavEvent::Click { anchor } => self.click(page, &anchor, out),
            NavEvent::Scroll | NavEvent::Resize => self.schedule_recompute(out),
            NavEvent::UserScrollIntent(source) => {
                if self.cancel_if_animating(out) {
                    debug!(?source, "user took over scrolling");
                    self.state.lock = None;
                    self.schedule_recompute(out);
                }
            }
            NavEvent::Frame => self.on_frame(page, out),
        }
    }

    fn click<P: Page + ?Sized>(&mut self, page: &P, anchor: &str, out: &mut Vec<Command>) {
        let Some(rect) = page.section_rect(anchor) else {
            return;
        };
        let Some(key) = self.sections.key_for(anchor).map(str::to_string) else {
            debug!(anchor, "click on unmapped anchor");
            return;
        };

        debug!(anchor, key = %key, "click locks highlight");
        self.state.lock = Some(key.clone());
        self.activate(&key, Activation::Explicit, out);
        out.push(Command::PushHistory(format!("#{}", anchor)));

        let target = target_offset(page.scroll_y(), rect, self.config.navbar_height);
        self.begin_animated_scroll_to(page, target, out);
    }

    fn go_to_hash<P: Page + ?Sized>(
        &mut self,
        page: &P,
        fragment: &str,
        out: &mut Vec<Command>,
    ) {
        let anchor = anchor_from_hash(fragment);
        let found = page
            .section_rect(anchor)
            .zip(self.sections.key_for(anchor).map(str::to_string));
        let Some((rect, key)) = found else {
            debug!(fragment, "unknown fragment, falling back to home");
            let home = self.config.home_key.clone();
            self.activate(&home, Activation::Explicit, out);
            self.update_on_scroll(page, out);
            return;
        };

        debug!(anchor, key = %key, "hash navigation");
        self.cancel_if_animating(out);
        self.state.lock = Some(key.clone());
        self.activate(&key, Activation::Explicit, out);
        out.push(Command::ScrollTo(target_offset(
            page.scroll_y(),
            rect,
            self.config.navbar_height,
        )));
        self.state.release_lock_on_frame = true;
        self.request_frame(out);
    }

    /// Start a programmatic scroll to `target`, replacing any in-flight one.
    ///
    /// The lock is released when the scroll settles: immediately for a jump,
    /// on the last frame for an animation.
    pub fn begin_animated_scroll_to<P: Page + ?Sized>(
        &mut self,
        page: &P,
        target: f64,
        out: &mut Vec<Command>,
    ) {
        self.cancel_if_animating(out);
        let plan = plan_scroll(
            &self.config,
            page.scroll_y(),
            target,
            page.prefers_reduced_motion(),
            page.now_ms(),
        );
        match plan {
            ScrollPlan::Jump(y) => {
                trace!(y, "jump");
                out.push(Command::ScrollTo(y));
                self.scroll_settled();
            }
            ScrollPlan::Animate(animation) => {
                trace!(
                    from = animation.start_y,
                    to = animation.target(),
                    duration_ms = animation.duration_ms,
                    "animate"
                );
                self.state.animation = Some(animation);
                out.push(Command::ListenForUserScroll(true));
                self.request_frame(out);
            }
        }
    }

    /// Drop the in-flight animation, if any, at its current position.
    ///
    /// Returns whether an animation was cancelled. Does not touch the lock.
    pub fn cancel_if_animating(&mut self, out: &mut Vec<Command>) -> bool {
        if self.state.animation.take().is_some() {
            out.push(Command::ListenForUserScroll(false));
            true
        } else {
            false
        }
    }

    fn scroll_settled(&mut self) {
        self.state.lock = None;
    }

    fn schedule_recompute(&mut self, out: &mut Vec<Command>) {
        if !self.state.recompute_pending {
            self.state.recompute_pending = true;
            self.request_frame(out);
        }
    }

    fn on_frame<P: Page + ?Sized>(&mut self, page: &P, out: &mut Vec<Command>) {
        self.state.frame_requested = false;

        let mut settled_now = false;
        if let Some(animation) = self.state.animation.clone() {
            let (y, finished) = animation.sample(page.now_ms());
            out.push(Command::ScrollTo(y));
            if finished {
                self.state.animation = None;
                out.push(Command::ListenForUserScroll(false));
                self.scroll_settled();
                settled_now = true;
                trace!(y, "animation finished");
            } else {
                self.request_frame(out);
            }
        }

        self.flush_pulse(out);

        // A click may have started an animation since the hash jump; its lock
        // outlives this release.
        let release = std::mem::take(&mut self.state.release_lock_on_frame);
        if release && !self.state.is_animating() {
            self.state.lock = None;
            if !settled_now {
                self.update_on_scroll(page, out);
            }
        }

        let pending = std::mem::take(&mut self.state.recompute_pending);
        if settled_now {
            // The final ScrollTo has not run yet; track against it next frame.
            self.schedule_recompute(out);
        } else if pending {
            self.update_on_scroll(page, out);
        }
    }

    fn flush_pulse(&mut self, out: &mut Vec<Command>) {
        if let Some(key) = self.state.pulse_pending.take() {
            out.push(Command::AddPulse {
                key,
                clear_after_ms: self.config.pulse_ms,
            });
        }
    }

    /// Passive tracking: highlight the section closest to the viewport
    /// center unless a lock is held.
    fn update_on_scroll<P: Page + ?Sized>(&mut self, page: &P, out: &mut Vec<Command>) {
        if self.state.lock.is_some() {
            return;
        }
        let key = closest_section(
            page,
            &self.sections,
            self.config.navbar_height,
            &self.config.home_key,
        )
        .to_string();
        self.activate(&key, Activation::Tracked, out);
    }

    fn activate(&mut self, key: &str, activation: Activation, out: &mut Vec<Command>) {
        if activation == Activation::Tracked && self.state.active.as_deref() == Some(key) {
            return;
        }
        debug!(key, ?activation, "activate");
        self.state.active = Some(key.to_string());
        out.push(Command::SetActive(key.to_string()));
        out.push(Command::ClearPulse(key.to_string()));
        self.state.pulse_pending = Some(key.to_string());
        self.request_frame(out);
    }

    fn request_frame(&mut self, out: &mut Vec<Command>) {
        if !self.state.frame_requested {
            self.state.frame_requested = true;
            out.push(Command::RequestFrame);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{IntentSource, Rect};
    use std::cell::Cell;

    /// Three stacked 1000px sections on a 3000px document.
    struct StubPage {
        scroll_y: Cell<f64>,
        now: Cell<f64>,
        reduced_motion: bool,
    }

    impl StubPage {
        fn new() -> Self {
            Self {
                scroll_y: Cell::new(0.0),
                now: Cell::new(0.0),
                reduced_motion: false,
            }
        }
    }

    impl Page for StubPage {
        fn scroll_y(&self) -> f64 {
            self.scroll_y.get()
        }
        fn viewport_height(&self) -> f64 {
            800.0
        }
        fn section_rect(&self, anchor: &str) -> Option<Rect> {
            let top = match anchor {
                "home" => 0.0,
                "about" => 1000.0,
                "contact" => 2000.0,
                _ => return None,
            };
            Some(Rect::new(top - self.scroll_y.get(), 1000.0))
        }
        fn prefers_reduced_motion(&self) -> bool {
            self.reduced_motion
        }
        fn now_ms(&self) -> f64 {
            self.now.get()
        }
    }

    fn home() -> NavHighlighter {
        NavHighlighter::new(SiteConfig::default(), PageMode::Home)
    }

    fn set_active_keys(commands: &[Command]) -> Vec<&str> {
        commands
            .iter()
            .filter_map(|cmd| match cmd {
                Command::SetActive(key) => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn load_without_fragment_tracks_passively() {
        let page = StubPage::new();
        let mut nav = home();
        let out = nav.handle(&page, NavEvent::Load { fragment: None });
        assert_eq!(set_active_keys(&out), vec!["home"]);
        assert_eq!(nav.state().lock(), None);
    }

    #[test]
    fn click_locks_pushes_history_and_animates() {
        let page = StubPage::new();
        let mut nav = home();
        nav.handle(&page, NavEvent::Load { fragment: None });

        let out = nav.handle(
            &page,
            NavEvent::Click {
                anchor: "contact".to_string(),
            },
        );
        assert_eq!(set_active_keys(&out), vec!["contact"]);
        assert!(out.contains(&Command::PushHistory("#contact".to_string())));
        assert!(out.contains(&Command::ListenForUserScroll(true)));
        assert_eq!(nav.state().lock(), Some("contact"));
        assert_eq!(nav.state().animation().map(|a| a.target()), Some(1920.0));
    }

    #[test]
    fn lock_suppresses_passive_tracking_until_animation_ends() {
        let page = StubPage::new();
        let mut nav = home();
        nav.handle(&page, NavEvent::Load { fragment: None });
        nav.handle(
            &page,
            NavEvent::Click {
                anchor: "contact".to_string(),
            },
        );

        page.scroll_y.set(500.0);
        page.now.set(100.0);
        nav.handle(&page, NavEvent::Scroll);
        let out = nav.handle(&page, NavEvent::Frame);
        assert!(set_active_keys(&out).is_empty());
        assert_eq!(nav.state().lock(), Some("contact"));

        page.now.set(1000.0);
        let out = nav.handle(&page, NavEvent::Frame);
        assert!(out.contains(&Command::ScrollTo(1920.0)));
        assert!(out.contains(&Command::ListenForUserScroll(false)));
        assert_eq!(nav.state().lock(), None);
        assert!(!nav.state().is_animating());
    }

    #[test]
    fn tracking_after_animation_waits_for_final_scroll() {
        let page = StubPage::new();
        let mut nav = home();
        nav.handle(&page, NavEvent::Load { fragment: None });
        nav.handle(
            &page,
            NavEvent::Click {
                anchor: "about".to_string(),
            },
        );

        // The host has not applied the final offset yet.
        page.now.set(1000.0);
        let out = nav.handle(&page, NavEvent::Frame);
        assert!(out.contains(&Command::ScrollTo(920.0)));
        assert!(out.contains(&Command::RequestFrame));
        assert!(set_active_keys(&out).is_empty());
        assert_eq!(nav.state().lock(), None);

        page.scroll_y.set(920.0);
        let out = nav.handle(&page, NavEvent::Frame);
        assert!(set_active_keys(&out).is_empty());
        assert_eq!(nav.state().active(), Some("about"));
    }

    #[test]
    fn second_click_replaces_in_flight_animation() {
        let page = StubPage::new();
        let mut nav = home();
        nav.handle(&page, NavEvent::Load { fragment: None });
        nav.handle(
            &page,
            NavEvent::Click {
                anchor: "contact".to_string(),
            },
        );

        page.scroll_y.set(1234.5);
        page.now.set(100.0);
        let out = nav.handle(
            &page,
            NavEvent::Click {
                anchor: "about".to_string(),
            },
        );
        assert!(out.contains(&Command::ListenForUserScroll(false)));
        assert!(out.contains(&Command::ListenForUserScroll(true)));
        assert_eq!(nav.state().lock(), Some("about"));
        assert_eq!(nav.state().animation().map(|a| a.target()), Some(920.0));

        page.now.set(1000.0);
        let out = nav.handle(&page, NavEvent::Frame);
        assert!(out.contains(&Command::ScrollTo(920.0)));
        assert_eq!(nav.state().lock(), None);
    }

    #[test]
    fn user_intent_cancels_animation_and_unlocks() {
        let page = StubPage::new();
        let mut nav = home();
        nav.handle(&page, NavEvent::Load { fragment: None });
        nav.handle(
            &page,
            NavEvent::Click {
                anchor: "about".to_string(),
            },
        );

        let out = nav.handle(&page, NavEvent::UserScrollIntent(IntentSource::Wheel));
        assert!(out.contains(&Command::ListenForUserScroll(false)));
        assert!(!out.iter().any(|cmd| matches!(cmd, Command::ScrollTo(_))));
        assert_eq!(nav.state().lock(), None);

        // Nothing in flight: further intents are no-ops.
        let out = nav.handle(&page, NavEvent::UserScrollIntent(IntentSource::Touch));
        assert!(out.is_empty());
    }

    #[test]
    fn reduced_motion_jumps_and_releases_lock() {
        let page = StubPage {
            reduced_motion: true,
            ..StubPage::new()
        };
        let mut nav = home();
        let out = nav.handle(
            &page,
            NavEvent::Click {
                anchor: "about".to_string(),
            },
        );
        assert!(out.contains(&Command::ScrollTo(920.0)));
        assert!(!nav.state().is_animating());
        assert_eq!(nav.state().lock(), None);
    }

    #[test]
    fn unknown_hash_falls_back_to_home() {
        let page = StubPage::new();
        let mut nav = home();
        let out = nav.handle(
            &page,
            NavEvent::Load {
                fragment: Some("#doesnotexist".to_string()),
            },
        );
        assert_eq!(set_active_keys(&out), vec!["home"]);
        assert!(!out.iter().any(|cmd| matches!(cmd, Command::ScrollTo(_))));
    }

    #[test]
    fn known_hash_jumps_and_releases_on_next_frame() {
        let page = StubPage::new();
        let mut nav = home();
        let out = nav.handle(
            &page,
            NavEvent::Load {
                fragment: Some("#about".to_string()),
            },
        );
        assert!(out.contains(&Command::ScrollTo(920.0)));
        assert_eq!(nav.state().lock(), Some("about"));

        page.scroll_y.set(920.0);
        let out = nav.handle(&page, NavEvent::Frame);
        assert_eq!(nav.state().lock(), None);
        assert!(out.contains(&Command::AddPulse {
            key: "about".to_string(),
            clear_after_ms: 400,
        }));
        // Passive tracking agrees, so no second activation.
        assert!(set_active_keys(&out).is_empty());
    }

    #[test]
    fn scroll_bursts_coalesce_into_one_frame() {
        let page = StubPage::new();
        let mut nav = home();
        nav.handle(&page, NavEvent::Load { fragment: None });
        nav.handle(&page, NavEvent::Frame);

        let first = nav.handle(&page, NavEvent::Scroll);
        let second = nav.handle(&page, NavEvent::Resize);
        let third = nav.handle(&page, NavEvent::Scroll);
        assert_eq!(first, vec![Command::RequestFrame]);
        assert!(second.is_empty());
        assert!(third.is_empty());

        page.scroll_y.set(1900.0);
        let out = nav.handle(&page, NavEvent::Frame);
        assert_eq!(set_active_keys(&out), vec!["contact"]);
    }

    #[test]
    fn subpage_highlights_current_and_ignores_everything_else() {
        let page = StubPage::new();
        let mut nav = NavHighlighter::new(
            SiteConfig::default(),
            PageMode::Subpage("leadership".to_string()),
        );
        let out = nav.handle(
            &page,
            NavEvent::Load {
                fragment: Some("#about".to_string()),
            },
        );
        assert_eq!(set_active_keys(&out), vec!["leadership"]);
        assert!(!nav.intercepts(&page, "about"));

        for event in [
            NavEvent::Scroll,
            NavEvent::Click {
                anchor: "about".to_string(),
            },
            NavEvent::HashChange {
                fragment: "#contact".to_string(),
            },
        ] {
            assert!(nav.handle(&page, event).is_empty());
        }
        assert_eq!(nav.state().active(), Some("leadership"));
    }
}
