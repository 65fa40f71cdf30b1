//! Scroll progress indicator

use crate::config::ProgressConfig;
use crate::page::{Region, Viewport};
use crate::surface::{ProgressBarSpec, Style, Surface};

/// Scrolled fraction of the document in percent, clamped to [0, 100]
///
/// A document that does not scroll (or is shorter than the viewport) reports 0.
pub fn scroll_percent(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    let percent = 100.0 * scroll_top / scrollable;
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Fixed bar whose width follows the raw scroll signal
#[derive(Debug, Clone)]
pub struct ProgressIndicator {
    spec: ProgressBarSpec,
    percent: f64,
}

impl ProgressIndicator {
    pub fn new(config: &ProgressConfig) -> Self {
        Self {
            spec: ProgressBarSpec {
                height: config.height,
                z_index: config.z_index,
                transition_ms: config.transition_ms,
            },
            percent: 0.0,
        }
    }

    /// Create the bar on the surface
    pub fn mount<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.create_progress_bar(&self.spec);
    }

    #[inline]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Recompute from the current viewport and write the width
    pub fn update<S: Surface + ?Sized>(&mut self, viewport: &Viewport, surface: &mut S) -> f64 {
        self.percent = scroll_percent(viewport.scroll_top, viewport.document_height, viewport.height);
        surface.set_style(Region::ProgressBar, Style::WidthPercent(self.percent));
        self.percent
    }
}
