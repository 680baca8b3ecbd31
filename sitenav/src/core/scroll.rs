//! Programmatic scroll planning and the ease-out animation.

use crate::core::config::SiteConfig;
use crate::core::geometry::round_px;

/// `1 - (1 - t)^4`, for `t` in `[0, 1]`.
pub fn ease_out_quart(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(4)
}

/// How a programmatic scroll reaches its target.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrollPlan {
    /// Set the offset directly.
    Jump(f64),
    /// Animate frame by frame.
    Animate(ScrollAnimation),
}

/// An in-flight animation, sampled against the wall clock so the duration
/// holds regardless of frame rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    pub start_y: f64,
    pub target_y: f64,
    pub duration_ms: f64,
    pub start_ms: f64,
}

impl ScrollAnimation {
    pub fn target(&self) -> f64 {
        self.target_y
    }

    /// Offset at `now_ms` and whether the animation has finished.
    ///
    /// The finishing sample is exactly `target_y`, even when `start_y` is
    /// fractional.
    pub fn sample(&self, now_ms: f64) -> (f64, bool) {
        let t = ((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0);
        if t >= 1.0 {
            return (self.target_y, true);
        }
        let delta = self.target_y - self.start_y;
        (self.start_y + delta * ease_out_quart(t), false)
    }
}

/// Decide between jumping and animating from `from` to `to`.
pub fn plan_scroll(
    config: &SiteConfig,
    from: f64,
    to: f64,
    reduced_motion: bool,
    now_ms: f64,
) -> ScrollPlan {
    if reduced_motion || (from - to).abs() < config.snap_threshold_px {
        return ScrollPlan::Jump(to);
    }

    let travel = round_px(to - from).abs();
    let duration_ms = (travel * config.ms_per_px)
        .max(config.min_duration_ms)
        .min(config.max_duration_ms);
    ScrollPlan::Animate(ScrollAnimation {
        start_y: from,
        target_y: to,
        duration_ms,
        start_ms: now_ms,
    })
}
