//! Terminal rendering target for the controller.
//!
//! Keeps the visual state the widgets draw from. Requests that need host action
//! (bringing a link into view, following a link) are queued and taken by the
//! app after each dispatch.

use std::collections::{BTreeMap, BTreeSet};

use masthead_core::carousel::CarouselRunState;
use masthead_core::surface::{ProgressBarSpec, Ripple, Stylesheet, Transform};
use masthead_core::{Class, Region, Style, Surface};
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct TerminalSurface {
    classes: BTreeMap<Region, BTreeSet<Class>>,
    header_opacity: Option<f64>,
    header_offset: f64,
    bar_offset: f64,
    progress: Option<ProgressBarSpec>,
    progress_percent: f64,
    play_state: CarouselRunState,
    link_scale: BTreeMap<usize, f64>,
    indicators: BTreeSet<usize>,
    ripples: BTreeMap<u64, Ripple>,
    stylesheets: Vec<Stylesheet>,
    scroll_into_view: Option<Region>,
    activated: Option<Region>,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, region: Region, class: Class) -> bool {
        self.classes
            .get(&region)
            .is_some_and(|set| set.contains(&class))
    }

    pub fn header_hidden(&self) -> bool {
        self.has_class(Region::PrimaryHeader, Class::Hidden)
    }

    /// Header is mid-appear: faded out or still offset
    pub fn header_fading(&self) -> bool {
        self.header_opacity.is_some_and(|o| o < 1.0) || self.header_offset < 0.0
    }

    /// Secondary bar is nudged up by the hide pulse
    pub fn bar_pulsing(&self) -> bool {
        self.bar_offset < 0.0
    }

    pub fn progress_mounted(&self) -> bool {
        self.progress.is_some()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress_percent
    }

    pub fn play_state(&self) -> CarouselRunState {
        self.play_state
    }

    pub fn active_link(&self) -> Option<usize> {
        self.classes.iter().find_map(|(region, set)| match region {
            Region::CarouselLink(i) if set.contains(&Class::Active) => Some(*i),
            _ => None,
        })
    }

    /// Link is enlarged by the hover pulse
    pub fn is_hovered(&self, link: usize) -> bool {
        self.link_scale.get(&link).is_some_and(|s| *s > 1.0)
    }

    pub fn has_indicator(&self, link: usize) -> bool {
        self.indicators.contains(&link)
    }

    pub fn has_ripple(&self, link: usize) -> bool {
        self.ripples.values().any(|r| r.link == link)
    }

    pub fn live_ripples(&self) -> usize {
        self.ripples.len()
    }

    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.stylesheets
    }

    /// Take a pending bring-into-view request
    pub fn take_scroll_into_view(&mut self) -> Option<Region> {
        self.scroll_into_view.take()
    }

    /// Take a pending follow-link request
    pub fn take_activated(&mut self) -> Option<Region> {
        self.activated.take()
    }
}

impl Surface for TerminalSurface {
    fn add_class(&mut self, region: Region, class: Class) {
        trace!(%region, class = class.name(), "add class");
        self.classes.entry(region).or_default().insert(class);
    }

    fn remove_class(&mut self, region: Region, class: Class) {
        if let Some(set) = self.classes.get_mut(&region) {
            set.remove(&class);
        }
    }

    fn set_style(&mut self, region: Region, style: Style) {
        trace!(%region, %style, "set style");
        match (region, style) {
            (Region::PrimaryHeader, Style::Opacity(o)) => self.header_opacity = Some(o),
            (Region::PrimaryHeader, Style::Transform(Transform::TranslateY(y))) => {
                self.header_offset = y
            }
            (Region::SecondaryBar, Style::Transform(Transform::TranslateY(y))) => {
                self.bar_offset = y
            }
            (Region::ProgressBar, Style::WidthPercent(w)) => self.progress_percent = w,
            (Region::CarouselTrack, Style::AnimationPlayState(state)) => self.play_state = state,
            (Region::CarouselLink(i), Style::Transform(Transform::Scale(s))) => {
                self.link_scale.insert(i, s);
            }
            _ => {}
        }
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.scroll_into_view = Some(region);
    }

    fn activate(&mut self, region: Region) {
        self.activated = Some(region);
    }

    fn create_progress_bar(&mut self, spec: &ProgressBarSpec) {
        self.progress = Some(*spec);
        self.progress_percent = 0.0;
    }

    fn install_stylesheet(&mut self, sheet: Stylesheet) {
        self.stylesheets.push(sheet);
    }

    fn ensure_link_indicator(&mut self, link: usize) {
        self.indicators.insert(link);
    }

    fn spawn_ripple(&mut self, ripple: &Ripple) {
        self.ripples.insert(ripple.id, *ripple);
    }

    fn remove_ripple(&mut self, id: u64) {
        self.ripples.remove(&id);
    }
}
