//! Demo page content and its pixel geometry.
//!
//! The terminal page is measured in rows and columns; the controller works in
//! pixels. One row is `ROW_PX` pixels tall and one column `COL_PX` wide.

use masthead_core::{PageLayout, Viewport};

pub const ROW_PX: f64 = 16.0;
pub const COL_PX: f64 = 8.0;

/// Rows taken by chrome around the scrolling content: progress bar, primary
/// header (2), secondary bar and status bar
pub const CHROME_ROWS: u16 = 5;

/// Rows the primary header occupies when shown
pub const HEADER_ROWS: u16 = 2;

const LINK_LABELS: [&str; 8] = [
    "Overview", "Guides", "Reference", "Changelog", "Community", "Blog", "Pricing", "Support",
];

const HERO_ROWS: usize = 12;

const LOREM: [&str; 6] = [
    "The header hides once you scroll down past the fold and comes back as soon as you scroll up.",
    "Small movements are ignored so that trackpad jitter never makes the header flicker.",
    "The thin bar at the very top shows how far through the page you are.",
    "Fast scrolling pauses the link carousel; it resumes once scrolling slows or stops.",
    "Press Tab to move focus into the secondary bar and use the arrow keys to walk its links.",
    "Stop scrolling near the top and the header returns even if you scrolled down to get there.",
];

#[derive(Debug, Clone)]
pub enum PageLine {
    /// Part of the hero block; `index` counts from its first row
    Hero { index: usize },
    Heading(String),
    Text(String),
    Blank,
}

#[derive(Debug, Clone)]
pub struct DemoPage {
    lines: Vec<PageLine>,
    links: Vec<String>,
}

impl Default for DemoPage {
    fn default() -> Self {
        Self::new(24)
    }
}

impl DemoPage {
    /// Build a page with a hero block followed by `sections` sections of text
    pub fn new(sections: usize) -> Self {
        let mut lines: Vec<PageLine> = (0..HERO_ROWS).map(|index| PageLine::Hero { index }).collect();
        lines.push(PageLine::Blank);

        for section in 0..sections {
            lines.push(PageLine::Heading(format!("Section {}", section + 1)));
            for i in 0..4 {
                lines.push(PageLine::Text(LOREM[(section + i) % LOREM.len()].to_string()));
            }
            lines.push(PageLine::Blank);
        }

        Self {
            lines,
            links: LINK_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn lines(&self) -> &[PageLine] {
        &self.lines
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn layout(&self) -> PageLayout {
        PageLayout::full(self.links.len())
    }

    pub fn document_height(&self) -> f64 {
        self.lines.len() as f64 * ROW_PX
    }

    /// Viewport for a terminal of `cols` x `rows`
    pub fn viewport(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            cols as f64 * COL_PX,
            content_rows(rows) as f64 * ROW_PX,
            self.document_height(),
        )
    }

    pub fn hero_height(&self) -> f64 {
        HERO_ROWS as f64 * ROW_PX
    }

    /// Hero top relative to the viewport top at `scroll_top`
    pub fn hero_top(&self, scroll_top: f64) -> f64 {
        -scroll_top
    }

    /// First line index visible at `scroll_top`
    pub fn first_visible_line(&self, scroll_top: f64) -> usize {
        (scroll_top.max(0.0) / ROW_PX).floor() as usize
    }
}

/// Rows left for page content in a terminal `rows` tall
pub fn content_rows(rows: u16) -> u16 {
    rows.saturating_sub(CHROME_ROWS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_in_pixels() {
        let page = DemoPage::new(2);
        // 12 hero rows, blank, 2 x (heading + 4 lines + blank)
        assert_eq!(page.lines().len(), 25);
        assert_eq!(page.document_height(), 400.0);

        let viewport = page.viewport(100, 30);
        assert_eq!(viewport.width, 800.0);
        assert_eq!(viewport.height, 25.0 * ROW_PX);
    }

    #[test]
    fn test_hero_scrolls_off_the_top() {
        let page = DemoPage::default();
        assert_eq!(page.hero_top(0.0), 0.0);
        assert_eq!(page.hero_top(64.0), -64.0);
        assert_eq!(page.first_visible_line(64.0), 4);
    }

    #[test]
    fn test_tiny_terminal_keeps_one_content_row() {
        assert_eq!(content_rows(3), 1);
    }
}
