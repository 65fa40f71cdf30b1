//! L3 Molecular Layer: scroll animator
//!
//! Positions are page offsets in pixels. Input accumulates into a pending delta
//! that is folded into the target on the next `update()`, so several key
//! repeats within one tick become one animation.

use std::time::{Duration, Instant};

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, lerp, progress};

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Offset currently shown
    position: f64,
    /// Input not yet folded into the target
    pending_delta: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            position: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Pending input or a running animation; drive updates at animation rate
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Where the current animation ends
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map_or(self.position, |a| a.to)
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Jump without animating
    pub fn set_position(&mut self, position: f64) {
        self.animation = None;
        self.pending_delta = 0.0;
        self.position = position;
    }

    /// Animate to an absolute offset
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64, now: Instant) {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        self.pending_delta = 0.0;

        if !self.config.is_smooth() {
            self.set_position(target);
            return;
        }
        if target == self.position {
            self.animation = None;
            return;
        }
        self.start(target, now);
    }

    /// Relative scroll; positive is down
    pub fn scroll_by(&mut self, delta: f64, max_scroll: f64) {
        if self.config.is_smooth() {
            self.pending_delta += delta;
        } else {
            self.position = (self.position + delta).clamp(0.0, max_scroll.max(0.0));
        }
    }

    /// Scroll by whole steps of the configured size
    pub fn scroll_steps(&mut self, steps: i32, max_scroll: f64) {
        self.scroll_by(steps as f64 * self.config.scroll_step, max_scroll);
    }

    /// Scroll by a fraction of the viewport (0.5 half page, 1.0 full page)
    pub fn scroll_pages(&mut self, pages: f64, viewport_height: f64, max_scroll: f64) {
        self.scroll_by(pages * viewport_height, max_scroll);
    }

    /// Advance to `now` and return the offset to show
    pub fn update(&mut self, now: Instant, max_scroll: f64) -> f64 {
        let max_scroll = max_scroll.max(0.0);

        if self.pending_delta != 0.0 {
            let target = (self.target() + self.pending_delta).clamp(0.0, max_scroll);
            self.pending_delta = 0.0;
            if target != self.position {
                self.start(target, now);
            }
        }

        if let Some(anim) = &self.animation {
            if is_complete(anim.start, now, anim.duration) {
                self.position = anim.to.min(max_scroll);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, now, anim.duration));
                self.position = lerp(anim.from, anim.to, t).round().min(max_scroll);
            }
        }

        self.position
    }

    fn start(&mut self, target: f64, now: Instant) {
        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.position,
            to: target,
            duration: self.config.animation_duration(),
            easing: self.config.easing,
        });
    }

    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }
}
