//! Carousel behavior: velocity-driven pause/resume of the auto-scrolling track
//! and keyboard navigation across its links.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CarouselConfig;
use crate::page::Region;
use crate::surface::{Class, Style, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarouselRunState {
    #[default]
    Running,
    Paused,
}

impl CarouselRunState {
    pub fn as_css(&self) -> &'static str {
        match self {
            CarouselRunState::Running => "running",
            CarouselRunState::Paused => "paused",
        }
    }
}

/// Keys the carousel understands; anything else is `Other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavKey {
    ArrowLeft,
    ArrowRight,
    Enter,
    #[serde(other)]
    Other,
}

impl NavKey {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => NavKey::ArrowLeft,
            "ArrowRight" => NavKey::ArrowRight,
            "Enter" => NavKey::Enter,
            _ => NavKey::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CarouselAdapter {
    config: CarouselConfig,
    has_track: bool,
    links: usize,
    run_state: CarouselRunState,
    active: Option<usize>,
}

impl CarouselAdapter {
    pub fn new(config: CarouselConfig, has_track: bool, links: usize) -> Self {
        Self {
            config,
            has_track,
            links,
            run_state: CarouselRunState::Running,
            active: None,
        }
    }

    #[inline]
    pub fn run_state(&self) -> CarouselRunState {
        self.run_state
    }

    #[inline]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    #[inline]
    pub fn link_count(&self) -> usize {
        self.links
    }

    /// Pause above the pause velocity, resume below the resume velocity,
    /// leave the state alone in between
    pub fn on_velocity<S: Surface + ?Sized>(&mut self, velocity: f64, surface: &mut S) {
        if velocity > self.config.pause_velocity {
            self.set_run_state(CarouselRunState::Paused, surface);
        } else if velocity < self.config.resume_velocity {
            self.set_run_state(CarouselRunState::Running, surface);
        }
    }

    /// Scrolling stopped
    pub fn resume<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.set_run_state(CarouselRunState::Running, surface);
    }

    fn set_run_state<S: Surface + ?Sized>(&mut self, state: CarouselRunState, surface: &mut S) {
        if !self.has_track || self.run_state == state {
            return;
        }
        self.run_state = state;
        debug!(state = state.as_css(), "carousel track");
        surface.set_style(Region::CarouselTrack, Style::AnimationPlayState(state));
    }

    /// Handle a key pressed while focus is `in_secondary_bar` or elsewhere.
    ///
    /// Returns true when the key was consumed and its default action should be
    /// suppressed.
    pub fn on_key<S: Surface + ?Sized>(
        &mut self,
        key: NavKey,
        in_secondary_bar: bool,
        surface: &mut S,
    ) -> bool {
        if !self.config.keyboard_navigation || !in_secondary_bar {
            return false;
        }

        match key {
            NavKey::ArrowLeft => {
                if let Some(index) = self.previous_index() {
                    self.set_active(index, surface);
                }
                true
            }
            NavKey::ArrowRight => {
                if let Some(index) = self.next_index() {
                    self.set_active(index, surface);
                }
                true
            }
            NavKey::Enter => {
                if let Some(index) = self.active {
                    surface.activate(Region::CarouselLink(index));
                }
                true
            }
            NavKey::Other => false,
        }
    }

    /// Make `index` the active link; out-of-range indices are ignored
    pub fn select<S: Surface + ?Sized>(&mut self, index: usize, surface: &mut S) -> bool {
        if index >= self.links {
            return false;
        }
        self.set_active(index, surface);
        true
    }

    fn previous_index(&self) -> Option<usize> {
        if self.links == 0 {
            return None;
        }
        Some(match self.active {
            Some(i) if i > 0 => i - 1,
            _ => self.links - 1,
        })
    }

    fn next_index(&self) -> Option<usize> {
        if self.links == 0 {
            return None;
        }
        Some(match self.active {
            Some(i) if i + 1 < self.links => i + 1,
            _ => 0,
        })
    }

    fn set_active<S: Surface + ?Sized>(&mut self, index: usize, surface: &mut S) {
        for link in 0..self.links {
            surface.remove_class(Region::CarouselLink(link), Class::Active);
        }
        surface.add_class(Region::CarouselLink(index), Class::Active);
        surface.scroll_into_view(Region::CarouselLink(index));
        self.active = Some(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Mutation, RecordingSurface, StyleProperty};

    fn adapter(links: usize) -> CarouselAdapter {
        CarouselAdapter::new(CarouselConfig::default(), true, links)
    }

    #[test]
    fn test_velocity_thresholds_and_dead_zone() {
        let mut carousel = adapter(5);
        let mut surface = RecordingSurface::new();

        carousel.on_velocity(25.0, &mut surface);
        assert_eq!(carousel.run_state(), CarouselRunState::Paused);

        carousel.on_velocity(12.0, &mut surface);
        assert_eq!(carousel.run_state(), CarouselRunState::Paused);

        carousel.on_velocity(3.0, &mut surface);
        assert_eq!(carousel.run_state(), CarouselRunState::Running);

        carousel.on_velocity(12.0, &mut surface);
        assert_eq!(carousel.run_state(), CarouselRunState::Running);

        assert_eq!(
            surface.style(Region::CarouselTrack, StyleProperty::AnimationPlayState),
            Some(Style::AnimationPlayState(CarouselRunState::Running))
        );
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let mut carousel = adapter(0);
        let mut surface = RecordingSurface::new();
        carousel.on_velocity(20.0, &mut surface);
        assert_eq!(carousel.run_state(), CarouselRunState::Running);

        carousel.on_velocity(21.0, &mut surface);
        carousel.on_velocity(5.0, &mut surface);
        assert_eq!(carousel.run_state(), CarouselRunState::Paused);
    }

    #[test]
    fn test_missing_track_never_writes() {
        let mut carousel = CarouselAdapter::new(CarouselConfig::default(), false, 3);
        let mut surface = RecordingSurface::new();
        carousel.on_velocity(100.0, &mut surface);
        assert!(surface.log().is_empty());
    }

    #[test]
    fn test_arrow_keys_wrap() {
        let mut carousel = adapter(5);
        let mut surface = RecordingSurface::new();
        carousel.select(0, &mut surface);

        assert!(carousel.on_key(NavKey::ArrowLeft, true, &mut surface));
        assert_eq!(carousel.active(), Some(4));
        assert!(surface.has_class(Region::CarouselLink(4), Class::Active));
        assert!(!surface.has_class(Region::CarouselLink(0), Class::Active));

        assert!(carousel.on_key(NavKey::ArrowRight, true, &mut surface));
        assert_eq!(carousel.active(), Some(0));
        assert_eq!(
            surface.log().last(),
            Some(&Mutation::ScrollIntoView {
                region: Region::CarouselLink(0)
            })
        );
    }

    #[test]
    fn test_first_navigation_without_active_link() {
        let mut surface = RecordingSurface::new();

        let mut carousel = adapter(3);
        carousel.on_key(NavKey::ArrowRight, true, &mut surface);
        assert_eq!(carousel.active(), Some(0));

        let mut carousel = adapter(3);
        carousel.on_key(NavKey::ArrowLeft, true, &mut surface);
        assert_eq!(carousel.active(), Some(2));
    }

    #[test]
    fn test_enter_activates_active_link() {
        let mut carousel = adapter(3);
        let mut surface = RecordingSurface::new();

        assert!(carousel.on_key(NavKey::Enter, true, &mut surface));
        assert!(surface.log().is_empty());

        carousel.select(1, &mut surface);
        carousel.on_key(NavKey::Enter, true, &mut surface);
        assert_eq!(
            surface.log().last(),
            Some(&Mutation::Activate {
                region: Region::CarouselLink(1)
            })
        );
    }

    #[test]
    fn test_keys_outside_bar_or_unknown_ignored() {
        let mut carousel = adapter(3);
        let mut surface = RecordingSurface::new();
        assert!(!carousel.on_key(NavKey::ArrowRight, false, &mut surface));
        assert!(!carousel.on_key(NavKey::Other, true, &mut surface));
        assert_eq!(carousel.active(), None);
        assert!(surface.log().is_empty());
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut carousel = adapter(2);
        let mut surface = RecordingSurface::new();
        assert!(!carousel.select(2, &mut surface));
        assert_eq!(carousel.active(), None);
    }

    #[test]
    fn test_key_names() {
        assert_eq!(NavKey::from_name("ArrowLeft"), NavKey::ArrowLeft);
        assert_eq!(NavKey::from_name("Escape"), NavKey::Other);
    }
}
