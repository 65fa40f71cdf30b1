//! Page description handed to the controller at construction time.
//!
//! The controller never looks regions up itself; the host states which of them
//! exist and keeps the viewport metrics current through events.

use serde::{Deserialize, Serialize};

/// A named region of the page the controller can mutate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    PrimaryHeader,
    SecondaryBar,
    Hero,
    Main,
    CarouselTrack,
    CarouselLink(usize),
    ProgressBar,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::PrimaryHeader => f.write_str("header"),
            Region::SecondaryBar => f.write_str("sub-header"),
            Region::Hero => f.write_str("hero"),
            Region::Main => f.write_str("main"),
            Region::CarouselTrack => f.write_str("carousel-track"),
            Region::CarouselLink(i) => write!(f, "carousel-link[{}]", i),
            Region::ProgressBar => f.write_str("scroll-progress"),
        }
    }
}

/// Which regions are present on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(default = "default_present")]
    pub primary_header: bool,
    #[serde(default = "default_present")]
    pub secondary_bar: bool,
    #[serde(default = "default_present")]
    pub hero: bool,
    #[serde(default = "default_present")]
    pub main: bool,
    #[serde(default = "default_present")]
    pub carousel_track: bool,
    /// Number of carousel links, in document order
    #[serde(default)]
    pub carousel_links: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            primary_header: true,
            secondary_bar: true,
            hero: true,
            main: true,
            carousel_track: true,
            carousel_links: 0,
        }
    }
}

impl PageLayout {
    /// A page with every region and `links` carousel links
    pub fn full(links: usize) -> Self {
        Self {
            carousel_links: links,
            ..Default::default()
        }
    }

    /// The controller only runs when both bars exist
    pub fn supports_controller(&self) -> bool {
        self.primary_header && self.secondary_bar
    }

    pub fn has(&self, region: Region) -> bool {
        match region {
            Region::PrimaryHeader => self.primary_header,
            Region::SecondaryBar => self.secondary_bar,
            Region::Hero => self.hero,
            Region::Main => self.main,
            Region::CarouselTrack => self.carousel_track,
            Region::CarouselLink(i) => i < self.carousel_links,
            Region::ProgressBar => true,
        }
    }
}

fn default_present() -> bool {
    true
}

/// Viewport metrics in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    #[serde(default)]
    pub scroll_top: f64,
    pub width: f64,
    pub height: f64,
    pub document_height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, document_height: f64) -> Self {
        Self {
            scroll_top: 0.0,
            width,
            height,
            document_height,
        }
    }

    /// Largest reachable scroll offset
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.height).max(0.0)
    }
}

/// Client rectangle of an element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}
