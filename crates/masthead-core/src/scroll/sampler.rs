//! Frame-coalesced scroll sampling

use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Down,
    Up,
}

/// One coalesced sample and the position it is compared against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub position: f64,
    pub previous: f64,
}

impl ScrollSample {
    /// Down only when strictly further than before; ties count as up
    #[inline]
    pub fn direction(&self) -> ScrollDirection {
        if self.position > self.previous {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        }
    }

    /// Distance between consecutive samples, also used as the velocity proxy
    #[inline]
    pub fn delta(&self) -> f64 {
        (self.position - self.previous).abs()
    }
}

/// Coalesces raw scroll notifications into per-frame samples
///
/// Call `on_scroll()` for every raw notification; when it returns `true` the
/// host must schedule a rendering frame. On that frame `on_frame()` yields the
/// sample for the latest position seen.
#[derive(Debug, Clone, Default)]
pub struct ScrollSampler {
    /// Position recorded by the last processed sample
    last_position: f64,
    /// Latest raw position not yet sampled
    pending: Option<f64>,
    /// A frame has been requested and not yet delivered
    frame_requested: bool,
}

impl ScrollSampler {
    pub fn new(initial_position: f64) -> Self {
        Self {
            last_position: initial_position,
            pending: None,
            frame_requested: false,
        }
    }

    /// Record a raw position; returns true when a new frame must be requested
    pub fn on_scroll(&mut self, position: f64) -> bool {
        self.pending = Some(position);
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Consume the pending position, if any, as this frame's sample
    pub fn on_frame(&mut self) -> Option<ScrollSample> {
        self.frame_requested = false;
        let position = self.pending.take()?;
        let sample = ScrollSample {
            position,
            previous: self.last_position,
        };
        self.last_position = position;
        trace!(position, delta = sample.delta(), "scroll sample");
        Some(sample)
    }

    #[inline]
    pub fn last_position(&self) -> f64 {
        self.last_position
    }

    #[inline]
    pub fn is_frame_requested(&self) -> bool {
        self.frame_requested
    }
}
