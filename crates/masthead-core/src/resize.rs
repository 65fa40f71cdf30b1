//! Debounced viewport width tracking

use std::time::Duration;

use tracing::debug;

use crate::timer::{TimerKind, TimerQueue};

/// Reports width changes once resizing has settled
///
/// Only the width is tracked, so a height-only change (mobile toolbar reflow)
/// never triggers anything.
#[derive(Debug, Clone)]
pub struct ResizeReactor {
    delay: Duration,
    last_width: f64,
}

impl ResizeReactor {
    pub fn new(delay: Duration, initial_width: f64) -> Self {
        Self {
            delay,
            last_width: initial_width,
        }
    }

    #[inline]
    pub fn last_width(&self) -> f64 {
        self.last_width
    }

    /// Restart the settle countdown
    pub fn on_resize(&self, now: Duration, timers: &mut TimerQueue) {
        timers.restart(TimerKind::ResizeSettled, now + self.delay);
    }

    /// Countdown expired; returns true when the width differs from the last one seen
    pub fn settle(&mut self, width: f64) -> bool {
        if width == self.last_width {
            return false;
        }
        debug!(from = self.last_width, to = width, "viewport width changed");
        self.last_width = width;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_change_reported_once() {
        let mut resize = ResizeReactor::new(Duration::from_millis(250), 1024.0);
        assert!(resize.settle(768.0));
        assert_eq!(resize.last_width(), 768.0);
        assert!(!resize.settle(768.0));
    }

    #[test]
    fn test_same_width_is_noop() {
        let mut resize = ResizeReactor::new(Duration::from_millis(250), 1024.0);
        assert!(!resize.settle(1024.0));
    }

    #[test]
    fn test_resizes_debounce() {
        let resize = ResizeReactor::new(Duration::from_millis(250), 1024.0);
        let mut timers = TimerQueue::new();
        resize.on_resize(Duration::from_millis(0), &mut timers);
        resize.on_resize(Duration::from_millis(100), &mut timers);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(350)));
    }
}
