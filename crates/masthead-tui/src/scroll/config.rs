//! L4 Atomic Layer: scroll configuration helpers

use std::time::Duration;

pub use masthead_core::ScrollConfig;

/// Extension trait for ScrollConfig with utility methods
pub trait ScrollConfigExt {
    fn animation_duration(&self) -> Duration;

    /// Interval between animation ticks
    fn animation_tick_duration(&self) -> Duration;

    /// Smooth scrolling is on and has a non-zero duration
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    #[inline]
    fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    fn animation_tick_duration(&self) -> Duration {
        match self.animation_fps {
            0 => Duration::from_millis(16),
            fps => Duration::from_millis((1000 / fps as u64).max(1)),
        }
    }

    #[inline]
    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
