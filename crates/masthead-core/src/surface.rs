//! The visual state channel.
//!
//! Everything the controller does ends up as a call on a [`Surface`]: adding or
//! removing a named class, writing a style property, or one of the few
//! structural requests (progress bar, stylesheets, ripples). Hosts implement the
//! trait for their rendering target; [`RecordingSurface`] keeps the current
//! state in memory and logs every call.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::carousel::CarouselRunState;
use crate::page::Region;

/// Style indicator toggled on a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Class {
    Scrolled,
    Hidden,
    HeaderHidden,
    ContentAdjusted,
    HeroPassed,
    Active,
}

impl Class {
    /// Class name as it appears in markup
    pub fn name(&self) -> &'static str {
        match self {
            Class::Scrolled => "scrolled",
            Class::Hidden => "hidden",
            Class::HeaderHidden => "header-hidden",
            Class::ContentAdjusted => "content-adjusted",
            Class::HeroPassed => "hero-passed",
            Class::Active => "active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transform {
    None,
    TranslateY(f64),
    Scale(f64),
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transform::None => f.write_str("none"),
            Transform::TranslateY(y) => write!(f, "translateY({}px)", y),
            Transform::Scale(s) => write!(f, "scale({})", s),
        }
    }
}

/// A direct style write
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Transform(Transform),
    Opacity(f64),
    WidthPercent(f64),
    AnimationPlayState(CarouselRunState),
}

impl Style {
    /// Property the write targets; later writes to the same property replace earlier ones
    pub fn property(&self) -> StyleProperty {
        match self {
            Style::Transform(_) => StyleProperty::Transform,
            Style::Opacity(_) => StyleProperty::Opacity,
            Style::WidthPercent(_) => StyleProperty::Width,
            Style::AnimationPlayState(_) => StyleProperty::AnimationPlayState,
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Style::Transform(t) => write!(f, "transform: {}", t),
            Style::Opacity(o) => write!(f, "opacity: {}", o),
            Style::WidthPercent(w) => write!(f, "width: {:.2}%", w),
            Style::AnimationPlayState(s) => write!(f, "animation-play-state: {}", s.as_css()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleProperty {
    Transform,
    Opacity,
    Width,
    AnimationPlayState,
}

/// Geometry of the fixed progress bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressBarSpec {
    pub height: f64,
    pub z_index: i32,
    pub transition_ms: u64,
}

/// Stylesheets installed once at setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stylesheet {
    RippleKeyframes,
    CompositingHints,
}

impl Stylesheet {
    pub fn css(&self) -> &'static str {
        match self {
            Stylesheet::RippleKeyframes => {
                "@keyframes ripple { to { transform: scale(2); opacity: 0; } }"
            }
            Stylesheet::CompositingHints => {
                ".header, .sub-header { transform: translateZ(0); backface-visibility: hidden; perspective: 1000px; }"
            }
        }
    }
}

/// A click ripple positioned relative to its link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    pub id: u64,
    pub link: usize,
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

/// Rendering target of the controller
pub trait Surface {
    fn add_class(&mut self, region: Region, class: Class);

    fn remove_class(&mut self, region: Region, class: Class);

    fn set_style(&mut self, region: Region, style: Style);

    /// Bring a region into centered view
    fn scroll_into_view(&mut self, _region: Region) {}

    /// Invoke a region's default action (follow a link)
    fn activate(&mut self, _region: Region) {}

    fn create_progress_bar(&mut self, _spec: &ProgressBarSpec) {}

    fn install_stylesheet(&mut self, _sheet: Stylesheet) {}

    fn ensure_link_indicator(&mut self, _link: usize) {}

    fn spawn_ripple(&mut self, _ripple: &Ripple) {}

    fn remove_ripple(&mut self, _id: u64) {}
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    AddClass { region: Region, class: Class },
    RemoveClass { region: Region, class: Class },
    SetStyle { region: Region, style: Style },
    ScrollIntoView { region: Region },
    Activate { region: Region },
    CreateProgressBar { spec: ProgressBarSpec },
    InstallStylesheet { sheet: Stylesheet },
    EnsureLinkIndicator { link: usize },
    SpawnRipple { ripple: Ripple },
    RemoveRipple { id: u64 },
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mutation::AddClass { region, class } => write!(f, "{} +{}", region, class.name()),
            Mutation::RemoveClass { region, class } => write!(f, "{} -{}", region, class.name()),
            Mutation::SetStyle { region, style } => write!(f, "{} {{ {} }}", region, style),
            Mutation::ScrollIntoView { region } => write!(f, "{} scroll-into-view", region),
            Mutation::Activate { region } => write!(f, "{} activate", region),
            Mutation::CreateProgressBar { spec } => {
                write!(f, "create scroll-progress (height {}px)", spec.height)
            }
            Mutation::InstallStylesheet { sheet } => write!(f, "install {:?}", sheet),
            Mutation::EnsureLinkIndicator { link } => {
                write!(f, "{} ensure link-indicator", Region::CarouselLink(*link))
            }
            Mutation::SpawnRipple { ripple } => write!(
                f,
                "{} ripple#{} size {} at ({}, {})",
                Region::CarouselLink(ripple.link),
                ripple.id,
                ripple.size,
                ripple.left,
                ripple.top
            ),
            Mutation::RemoveRipple { id } => write!(f, "ripple#{} removed", id),
        }
    }
}

/// In-memory surface: current classes and styles per region plus a call log
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    classes: BTreeMap<Region, BTreeSet<Class>>,
    styles: BTreeMap<(Region, StyleProperty), Style>,
    ripples: BTreeMap<u64, Ripple>,
    stylesheets: Vec<Stylesheet>,
    log: Vec<Mutation>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, region: Region, class: Class) -> bool {
        self.classes
            .get(&region)
            .is_some_and(|set| set.contains(&class))
    }

    pub fn classes(&self, region: Region) -> Vec<Class> {
        self.classes
            .get(&region)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn style(&self, region: Region, property: StyleProperty) -> Option<Style> {
        self.styles.get(&(region, property)).copied()
    }

    pub fn live_ripples(&self) -> usize {
        self.ripples.len()
    }

    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.stylesheets
    }

    pub fn log(&self) -> &[Mutation] {
        &self.log
    }

    /// Take the log recorded so far, leaving the current state untouched
    pub fn drain_log(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.log)
    }
}

impl Surface for RecordingSurface {
    fn add_class(&mut self, region: Region, class: Class) {
        self.classes.entry(region).or_default().insert(class);
        self.log.push(Mutation::AddClass { region, class });
    }

    fn remove_class(&mut self, region: Region, class: Class) {
        if let Some(set) = self.classes.get_mut(&region) {
            set.remove(&class);
        }
        self.log.push(Mutation::RemoveClass { region, class });
    }

    fn set_style(&mut self, region: Region, style: Style) {
        self.styles.insert((region, style.property()), style);
        self.log.push(Mutation::SetStyle { region, style });
    }

    fn scroll_into_view(&mut self, region: Region) {
        self.log.push(Mutation::ScrollIntoView { region });
    }

    fn activate(&mut self, region: Region) {
        self.log.push(Mutation::Activate { region });
    }

    fn create_progress_bar(&mut self, spec: &ProgressBarSpec) {
        self.styles.insert(
            (Region::ProgressBar, StyleProperty::Width),
            Style::WidthPercent(0.0),
        );
        self.log.push(Mutation::CreateProgressBar { spec: *spec });
    }

    fn install_stylesheet(&mut self, sheet: Stylesheet) {
        self.stylesheets.push(sheet);
        self.log.push(Mutation::InstallStylesheet { sheet });
    }

    fn ensure_link_indicator(&mut self, link: usize) {
        self.log.push(Mutation::EnsureLinkIndicator { link });
    }

    fn spawn_ripple(&mut self, ripple: &Ripple) {
        self.ripples.insert(ripple.id, *ripple);
        self.log.push(Mutation::SpawnRipple { ripple: *ripple });
    }

    fn remove_ripple(&mut self, id: u64) {
        self.ripples.remove(&id);
        self.log.push(Mutation::RemoveRipple { id });
    }
}
