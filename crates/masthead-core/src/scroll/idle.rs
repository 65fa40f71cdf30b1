//! Scroll-stop detection

use std::time::Duration;

use crate::timer::{TimerKind, TimerQueue};

/// Emitted once scrolling has been quiet for the idle delay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStopped {
    /// Scroll position when the countdown expired
    pub position: f64,
}

/// Restartable quiet-period countdown over the raw scroll signal
#[derive(Debug, Clone)]
pub struct IdleDetector {
    delay: Duration,
}

impl IdleDetector {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the countdown; only the most recent one can fire
    pub fn on_scroll(&self, now: Duration, timers: &mut TimerQueue) {
        timers.restart(TimerKind::ScrollIdle, now + self.delay);
    }

    /// Build the stop event when the countdown fires
    pub fn expire(&self, position: f64) -> ScrollStopped {
        ScrollStopped { position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_scroll_restarts_countdown() {
        let idle = IdleDetector::new(Duration::from_millis(150));
        let mut timers = TimerQueue::new();

        idle.on_scroll(Duration::from_millis(0), &mut timers);
        idle.on_scroll(Duration::from_millis(100), &mut timers);
        idle.on_scroll(Duration::from_millis(200), &mut timers);

        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_deadline(), Some(Duration::from_millis(350)));
        assert!(timers.pop_due(Duration::from_millis(349)).is_none());
        assert_eq!(
            timers.pop_due(Duration::from_millis(350)),
            Some((Duration::from_millis(350), TimerKind::ScrollIdle))
        );
    }
}
