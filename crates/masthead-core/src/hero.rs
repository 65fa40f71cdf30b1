//! Hero region visibility tracking
//!
//! Hosts with a native intersection observer forward its entries through
//! `on_entries()`. Hosts without one call `observe()` with the hero geometry on
//! every scroll; it computes the same threshold crossings and only emits an
//! entry when the intersecting state flips.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::HeroConfig;
use crate::page::Region;
use crate::surface::{Class, Surface};

/// One observation delivered in a batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    #[serde(default = "default_target")]
    pub target: Region,
    pub is_intersecting: bool,
    #[serde(default)]
    pub ratio: f64,
}

fn default_target() -> Region {
    Region::Hero
}

#[derive(Debug, Clone)]
pub struct HeroObserver {
    config: HeroConfig,
    /// Last intersecting state reported by `observe()`
    last_observed: Option<bool>,
    /// Secondary bar currently carries "hero-passed"
    passed: bool,
}

impl HeroObserver {
    pub fn new(config: HeroConfig) -> Self {
        Self {
            config,
            last_observed: None,
            passed: false,
        }
    }

    #[inline]
    pub fn is_passed(&self) -> bool {
        self.passed
    }

    /// Apply an observation batch; entries for other targets are ignored
    pub fn on_entries<S: Surface + ?Sized>(&mut self, entries: &[IntersectionEntry], surface: &mut S) {
        for entry in entries.iter().filter(|e| e.target == Region::Hero) {
            self.passed = !entry.is_intersecting;
            if entry.is_intersecting {
                surface.remove_class(Region::SecondaryBar, Class::HeroPassed);
            } else {
                surface.add_class(Region::SecondaryBar, Class::HeroPassed);
            }
            debug!(intersecting = entry.is_intersecting, ratio = entry.ratio, "hero observed");
        }
    }

    /// Compute an entry from geometry, `hero_top` relative to the viewport top
    ///
    /// Returns `None` while the intersecting state is unchanged.
    pub fn observe(
        &mut self,
        hero_top: f64,
        hero_height: f64,
        viewport_height: f64,
    ) -> Option<IntersectionEntry> {
        let ratio = intersection_ratio(hero_top, hero_height, viewport_height, self.config.root_margin);
        let is_intersecting = ratio > 0.0 && ratio >= self.config.threshold;

        if self.last_observed == Some(is_intersecting) {
            return None;
        }
        self.last_observed = Some(is_intersecting);

        Some(IntersectionEntry {
            target: Region::Hero,
            is_intersecting,
            ratio,
        })
    }
}

/// Visible fraction of a target inside a viewport shrunk by `margin` at top and bottom
pub fn intersection_ratio(top: f64, height: f64, viewport_height: f64, margin: f64) -> f64 {
    let root_top = margin;
    let root_bottom = viewport_height - margin;
    if root_bottom <= root_top {
        return 0.0;
    }

    if height <= 0.0 {
        return if top >= root_top && top <= root_bottom { 1.0 } else { 0.0 };
    }

    let visible = (top + height).min(root_bottom) - top.max(root_top);
    (visible.max(0.0) / height).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn entry(is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            target: Region::Hero,
            is_intersecting,
            ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }

    #[test]
    fn test_entries_toggle_hero_passed() {
        let mut hero = HeroObserver::new(HeroConfig::default());
        let mut surface = RecordingSurface::new();

        hero.on_entries(&[entry(false)], &mut surface);
        assert!(hero.is_passed());
        assert!(surface.has_class(Region::SecondaryBar, Class::HeroPassed));

        hero.on_entries(&[entry(true)], &mut surface);
        assert!(!hero.is_passed());
        assert!(!surface.has_class(Region::SecondaryBar, Class::HeroPassed));
    }

    #[test]
    fn test_last_entry_in_batch_wins() {
        let mut hero = HeroObserver::new(HeroConfig::default());
        let mut surface = RecordingSurface::new();
        hero.on_entries(&[entry(true), entry(false)], &mut surface);
        assert!(hero.is_passed());
    }

    #[test]
    fn test_other_targets_ignored() {
        let mut hero = HeroObserver::new(HeroConfig::default());
        let mut surface = RecordingSurface::new();
        let other = IntersectionEntry {
            target: Region::Main,
            is_intersecting: false,
            ratio: 0.0,
        };
        hero.on_entries(&[other], &mut surface);
        assert!(!hero.is_passed());
        assert!(surface.log().is_empty());
    }

    #[test]
    fn test_ratio_respects_root_margin() {
        // 800px viewport shrinks to [50, 750]
        assert_eq!(intersection_ratio(100.0, 400.0, 800.0, 50.0), 1.0);
        // Top 100px of a 400px hero is above the shrunk root
        assert_eq!(intersection_ratio(-50.0, 400.0, 800.0, 50.0), 0.75);
        // Only the part inside the margin band is visible
        assert_eq!(intersection_ratio(-360.0, 400.0, 800.0, 50.0), 0.0);
        assert_eq!(intersection_ratio(0.0, 100.0, 80.0, 50.0), 0.0);
    }

    #[test]
    fn test_observe_reports_only_crossings() {
        let mut hero = HeroObserver::new(HeroConfig::default());

        let first = hero.observe(100.0, 400.0, 800.0).unwrap();
        assert!(first.is_intersecting);
        assert!(hero.observe(0.0, 400.0, 800.0).is_none());

        // 30px of 400 visible below the 50px margin: 7.5% < 10%
        let crossed = hero.observe(-320.0, 400.0, 800.0).unwrap();
        assert!(!crossed.is_intersecting);
        assert!(hero.observe(-900.0, 400.0, 800.0).is_none());
    }
}
