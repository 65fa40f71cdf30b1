//! Header visibility state machine
//!
//! Owns the shown/hidden state of the primary header and the classes mirrored
//! onto the secondary bar and the main region. Transitions:
//!
//! - Shown -> Hidden: scrolling down, past `hide_threshold`, by more than
//!   `jitter_tolerance`
//! - Hidden -> Shown: scrolling up by more than `jitter_tolerance`, scrolling
//!   stopped above `show_threshold`, or a forced show after a width change
//!
//! The "scrolled" class on the secondary bar is a separate continuous toggle.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HeaderConfig;
use crate::page::Region;
use crate::scroll::{ScrollDirection, ScrollSample};
use crate::surface::{Class, Style, Surface, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderVisibility {
    #[default]
    Shown,
    Hidden,
}

/// Why a hidden header is being shown again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowReason {
    ScrolledUp,
    ScrollStopped,
    WidthChanged,
}

/// A state change that happened, for the controller to schedule follow-ups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTransition {
    /// Header hid; the secondary bar pulse needs resetting later
    Hidden,
    /// Header reappeared; the appear animation finishes on the next frame
    Shown(ShowReason),
}

#[derive(Debug, Clone)]
pub struct HeaderMachine {
    config: HeaderConfig,
    has_main: bool,
    state: HeaderVisibility,
    scrolled: bool,
}

impl HeaderMachine {
    pub fn new(config: HeaderConfig, has_main: bool) -> Self {
        Self {
            config,
            has_main,
            state: HeaderVisibility::Shown,
            scrolled: false,
        }
    }

    #[inline]
    pub fn state(&self) -> HeaderVisibility {
        self.state
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.state == HeaderVisibility::Hidden
    }

    /// Whether the secondary bar currently carries "scrolled"
    #[inline]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Apply one coalesced scroll sample
    pub fn on_sample<S: Surface + ?Sized>(
        &mut self,
        sample: &ScrollSample,
        surface: &mut S,
    ) -> Option<HeaderTransition> {
        self.update_scrolled(sample.position, surface);

        let delta = sample.delta();
        if delta <= self.config.jitter_tolerance {
            return None;
        }

        match sample.direction() {
            ScrollDirection::Down if sample.position > self.config.hide_threshold => {
                self.hide(surface)
            }
            ScrollDirection::Down => None,
            ScrollDirection::Up => self.show(ShowReason::ScrolledUp, surface),
        }
    }

    /// Scrolling went quiet at `position`
    pub fn on_scroll_stopped<S: Surface + ?Sized>(
        &mut self,
        position: f64,
        surface: &mut S,
    ) -> Option<HeaderTransition> {
        if position < self.config.show_threshold && self.is_hidden() {
            self.show(ShowReason::ScrollStopped, surface)
        } else {
            None
        }
    }

    /// Show regardless of scroll state (viewport width changed)
    pub fn force_show<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<HeaderTransition> {
        self.show(ShowReason::WidthChanged, surface)
    }

    /// Second half of the appear animation, run one frame after showing
    pub fn finish_appear<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_style(Region::PrimaryHeader, Style::Transform(Transform::TranslateY(0.0)));
        surface.set_style(Region::PrimaryHeader, Style::Opacity(1.0));
    }

    /// End of the secondary bar pulse played on hide
    pub fn finish_pulse<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.set_style(Region::SecondaryBar, Style::Transform(Transform::TranslateY(0.0)));
    }

    fn update_scrolled<S: Surface + ?Sized>(&mut self, position: f64, surface: &mut S) {
        let scrolled = position > self.config.scrolled_offset;
        if scrolled == self.scrolled {
            return;
        }
        self.scrolled = scrolled;
        if scrolled {
            surface.add_class(Region::SecondaryBar, Class::Scrolled);
        } else {
            surface.remove_class(Region::SecondaryBar, Class::Scrolled);
        }
    }

    fn hide<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Option<HeaderTransition> {
        if self.is_hidden() {
            return None;
        }
        self.state = HeaderVisibility::Hidden;
        debug!("primary header hidden");

        surface.add_class(Region::PrimaryHeader, Class::Hidden);
        surface.add_class(Region::SecondaryBar, Class::HeaderHidden);
        if self.has_main {
            surface.add_class(Region::Main, Class::ContentAdjusted);
        }
        surface.set_style(Region::SecondaryBar, Style::Transform(Transform::TranslateY(-2.0)));

        Some(HeaderTransition::Hidden)
    }

    fn show<S: Surface + ?Sized>(
        &mut self,
        reason: ShowReason,
        surface: &mut S,
    ) -> Option<HeaderTransition> {
        if !self.is_hidden() {
            return None;
        }
        self.state = HeaderVisibility::Shown;
        debug!(?reason, "primary header shown");

        surface.remove_class(Region::PrimaryHeader, Class::Hidden);
        surface.remove_class(Region::SecondaryBar, Class::HeaderHidden);
        if self.has_main {
            surface.remove_class(Region::Main, Class::ContentAdjusted);
        }
        surface.set_style(Region::PrimaryHeader, Style::Transform(Transform::TranslateY(-10.0)));
        surface.set_style(Region::PrimaryHeader, Style::Opacity(0.0));

        Some(HeaderTransition::Shown(reason))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, StyleProperty};

    fn sample(previous: f64, position: f64) -> ScrollSample {
        ScrollSample { position, previous }
    }

    fn machine() -> HeaderMachine {
        HeaderMachine::new(HeaderConfig::default(), true)
    }

    #[test]
    fn test_jump_past_threshold_hides() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();

        let transition = header.on_sample(&sample(0.0, 250.0), &mut surface);

        assert_eq!(transition, Some(HeaderTransition::Hidden));
        assert_eq!(header.state(), HeaderVisibility::Hidden);
        assert!(surface.has_class(Region::PrimaryHeader, Class::Hidden));
        assert!(surface.has_class(Region::SecondaryBar, Class::HeaderHidden));
        assert!(surface.has_class(Region::Main, Class::ContentAdjusted));
        assert!(surface.has_class(Region::SecondaryBar, Class::Scrolled));
        assert_eq!(
            surface.style(Region::SecondaryBar, StyleProperty::Transform),
            Some(Style::Transform(Transform::TranslateY(-2.0)))
        );
    }

    #[test]
    fn test_scroll_up_shows() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();
        header.on_sample(&sample(0.0, 240.0), &mut surface);
        // 3px back up is jitter
        header.on_sample(&sample(240.0, 237.0), &mut surface);
        assert!(header.is_hidden());

        let transition = header.on_sample(&sample(237.0, 100.0), &mut surface);

        assert_eq!(transition, Some(HeaderTransition::Shown(ShowReason::ScrolledUp)));
        assert!(!surface.has_class(Region::PrimaryHeader, Class::Hidden));
        assert!(!surface.has_class(Region::SecondaryBar, Class::HeaderHidden));
        assert!(!surface.has_class(Region::Main, Class::ContentAdjusted));
        assert_eq!(
            surface.style(Region::PrimaryHeader, StyleProperty::Opacity),
            Some(Style::Opacity(0.0))
        );
    }

    #[test]
    fn test_small_deltas_never_transition() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();
        let mut previous = 0.0;
        for position in [5.0, 10.0, 15.0, 14.0, 300.0, 305.0, 300.0, 296.0, 301.0] {
            let before = header.state();
            let s = sample(previous, position);
            header.on_sample(&s, &mut surface);
            if s.delta() <= 5.0 {
                assert_eq!(header.state(), before, "delta {} changed state", s.delta());
            }
            previous = position;
        }
    }

    #[test]
    fn test_down_below_hide_threshold_stays_shown() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();
        assert_eq!(header.on_sample(&sample(0.0, 200.0), &mut surface), None);
        assert_eq!(header.state(), HeaderVisibility::Shown);
    }

    #[test]
    fn test_scroll_stopped_near_top_shows() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();
        header.on_sample(&sample(0.0, 250.0), &mut surface);

        assert_eq!(header.on_scroll_stopped(150.0, &mut surface), None);
        assert!(header.is_hidden());

        assert_eq!(
            header.on_scroll_stopped(50.0, &mut surface),
            Some(HeaderTransition::Shown(ShowReason::ScrollStopped))
        );
        assert!(!header.is_hidden());
    }

    #[test]
    fn test_scrolled_class_toggles_at_offset() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();
        header.on_sample(&sample(0.0, 51.0), &mut surface);
        assert!(header.is_scrolled());
        header.on_sample(&sample(51.0, 50.0), &mut surface);
        assert!(!header.is_scrolled());
        assert!(!surface.has_class(Region::SecondaryBar, Class::Scrolled));
    }

    #[test]
    fn test_missing_main_region_skips_padding_class() {
        let mut header = HeaderMachine::new(HeaderConfig::default(), false);
        let mut surface = RecordingSurface::new();
        header.on_sample(&sample(0.0, 250.0), &mut surface);
        assert!(header.is_hidden());
        assert!(surface.classes(Region::Main).is_empty());
    }

    #[test]
    fn test_force_show_only_acts_when_hidden() {
        let mut header = machine();
        let mut surface = RecordingSurface::new();
        assert_eq!(header.force_show(&mut surface), None);
        assert!(surface.log().is_empty());
    }
}
