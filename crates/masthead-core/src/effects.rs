//! Cosmetic effects on carousel links: hover pulse and click ripple.
//!
//! Fire-and-forget: nothing here feeds back into controller state. Stylesheets
//! are installed once in `setup()`, never per interaction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::EffectsConfig;
use crate::page::{Rect, Region};
use crate::surface::{Ripple, Style, Stylesheet, Surface, Transform};
use crate::timer::{TimerKind, TimerQueue};

/// A click on a carousel link at client coordinates `(x, y)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkClick {
    pub link: usize,
    pub x: f64,
    pub y: f64,
    /// Client rectangle of the link
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct Effects {
    config: EffectsConfig,
    links: usize,
    next_ripple_id: u64,
}

impl Effects {
    pub fn new(config: EffectsConfig, links: usize) -> Self {
        Self {
            config,
            links,
            next_ripple_id: 1,
        }
    }

    /// One-time setup: stylesheets and link indicators
    pub fn setup<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.install_stylesheet(Stylesheet::CompositingHints);
        if self.config.enabled {
            surface.install_stylesheet(Stylesheet::RippleKeyframes);
        }
        for link in 0..self.links {
            surface.ensure_link_indicator(link);
        }
    }

    pub fn on_pointer_enter<S: Surface + ?Sized>(
        &self,
        link: usize,
        now: Duration,
        surface: &mut S,
        timers: &mut TimerQueue,
    ) {
        if !self.config.enabled || link >= self.links {
            return;
        }
        surface.set_style(
            Region::CarouselLink(link),
            Style::Transform(Transform::Scale(self.config.hover_scale)),
        );
        timers.schedule(TimerKind::HoverReset(link), now + self.config.hover_pulse());
    }

    pub fn finish_hover<S: Surface + ?Sized>(&self, link: usize, surface: &mut S) {
        surface.set_style(Region::CarouselLink(link), Style::Transform(Transform::Scale(1.0)));
    }

    /// Spawn a ripple centered on the click point
    pub fn on_click<S: Surface + ?Sized>(
        &mut self,
        click: &LinkClick,
        now: Duration,
        surface: &mut S,
        timers: &mut TimerQueue,
    ) -> Option<Ripple> {
        if !self.config.enabled || click.link >= self.links {
            return None;
        }
        let rect = click.rect;
        let size = rect.width.max(rect.height);
        let ripple = Ripple {
            id: self.next_ripple_id,
            link: click.link,
            size,
            left: click.x - rect.left - size / 2.0,
            top: click.y - rect.top - size / 2.0,
        };
        self.next_ripple_id += 1;

        surface.spawn_ripple(&ripple);
        timers.schedule(
            TimerKind::RippleExpired(ripple.id),
            now + self.config.ripple_lifetime(),
        );
        Some(ripple)
    }

    pub fn expire_ripple<S: Surface + ?Sized>(&self, id: u64, surface: &mut S) {
        surface.remove_ripple(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Mutation, RecordingSurface};

    #[test]
    fn test_setup_installs_stylesheets_once() {
        let effects = Effects::new(EffectsConfig::default(), 2);
        let mut surface = RecordingSurface::new();
        effects.setup(&mut surface);

        assert_eq!(
            surface.stylesheets(),
            &[Stylesheet::CompositingHints, Stylesheet::RippleKeyframes]
        );
        assert!(surface
            .log()
            .contains(&Mutation::EnsureLinkIndicator { link: 1 }));
    }

    #[test]
    fn test_ripple_geometry_and_expiry() {
        let mut effects = Effects::new(EffectsConfig::default(), 3);
        let mut surface = RecordingSurface::new();
        let mut timers = TimerQueue::new();

        let ripple = effects
            .on_click(
                &LinkClick {
                    link: 1,
                    x: 130.0,
                    y: 25.0,
                    rect: Rect::new(100.0, 10.0, 80.0, 30.0),
                },
                Duration::from_millis(1000),
                &mut surface,
                &mut timers,
            )
            .unwrap();

        assert_eq!(ripple.size, 80.0);
        assert_eq!(ripple.left, -10.0);
        assert_eq!(ripple.top, -25.0);
        assert_eq!(surface.live_ripples(), 1);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(1600)));

        effects.expire_ripple(ripple.id, &mut surface);
        assert_eq!(surface.live_ripples(), 0);
    }

    #[test]
    fn test_ripple_ids_increase() {
        let mut effects = Effects::new(EffectsConfig::default(), 1);
        let mut surface = RecordingSurface::new();
        let mut timers = TimerQueue::new();
        let click = LinkClick {
            link: 0,
            x: 1.0,
            y: 1.0,
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
        };
        let a = effects.on_click(&click, Duration::ZERO, &mut surface, &mut timers);
        let b = effects.on_click(&click, Duration::ZERO, &mut surface, &mut timers);
        assert!(a.unwrap().id < b.unwrap().id);
    }

    #[test]
    fn test_disabled_effects_do_nothing() {
        let config = EffectsConfig {
            enabled: false,
            ..Default::default()
        };
        let effects = Effects::new(config, 2);
        let mut surface = RecordingSurface::new();
        let mut timers = TimerQueue::new();

        effects.on_pointer_enter(0, Duration::ZERO, &mut surface, &mut timers);
        assert!(surface.log().is_empty());
        assert!(timers.is_empty());
    }
}
