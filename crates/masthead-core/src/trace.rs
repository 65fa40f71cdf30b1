//! Scripted event traces and their replay.
//!
//! A trace describes a page (layout and initial viewport) and a list of
//! timestamped events. Replaying runs them through a controller attached to a
//! [`RecordingSurface`] and reports every surface mutation with the controller
//! time at which it happened.
//!
//! ```toml
//! frame_interval_ms = 16
//! settle_ms = 500
//!
//! [layout]
//! carousel_links = 5
//!
//! [viewport]
//! width = 1024.0
//! height = 800.0
//! document_height = 2000.0
//!
//! [[steps]]
//! at_ms = 0
//! event = { type = "scroll", top = 250.0 }
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::controller::{Controller, Snapshot};
use crate::event::PageEvent;
use crate::page::{PageLayout, Viewport};
use crate::surface::{Mutation, RecordingSurface};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub layout: PageLayout,
    pub viewport: Viewport,
    /// When set, frames are delivered automatically at this interval while
    /// the controller asks for them
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,
    /// Extra time to run after the last step so pending timers fire
    #[serde(default)]
    pub settle_ms: u64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    pub event: PageEvent,
}

impl Trace {
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let trace: Self =
            toml::from_str(content).map_err(|e| crate::Error::Trace(e.to_string()))?;
        trace.validate()?;
        Ok(trace)
    }

    pub fn from_json(content: &str) -> crate::Result<Self> {
        let trace: Self = serde_json::from_str(content)?;
        trace.validate()?;
        Ok(trace)
    }

    /// Load a trace; `.json` files are JSON, anything else TOML
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(path, &content)
    }

    /// Parse already-read content, picking the format from `path`
    pub fn parse(path: &Path, content: &str) -> crate::Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(content)
        } else {
            Self::from_toml(content)
        }
    }

    fn validate(&self) -> crate::Result<()> {
        if let Some(pair) = self.steps.windows(2).find(|w| w[1].at_ms < w[0].at_ms) {
            return Err(crate::Error::Trace(format!(
                "steps out of order: {}ms after {}ms",
                pair[1].at_ms, pair[0].at_ms
            )));
        }
        if self.frame_interval_ms == Some(0) {
            return Err(crate::Error::Trace("frame_interval_ms must be positive".into()));
        }
        Ok(())
    }
}

/// A mutation stamped with controller time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub at_ms: u64,
    pub mutation: Mutation,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// False when the layout lacks the header regions
    pub attached: bool,
    pub frames: u64,
    pub entries: Vec<LogEntry>,
    pub snapshot: Option<Snapshot>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.attached {
            return writeln!(f, "controller not attached: primary header or secondary bar missing");
        }
        for entry in &self.entries {
            writeln!(f, "[{:>6}ms] {}", entry.at_ms, entry.mutation)?;
        }
        if let Some(s) = &self.snapshot {
            writeln!(f, "---")?;
            writeln!(f, "frames:    {}", self.frames)?;
            writeln!(f, "header:    {:?}", s.header)?;
            writeln!(f, "carousel:  {}", s.carousel.as_css())?;
            match s.active_link {
                Some(i) => writeln!(f, "active:    link {}", i)?,
                None => writeln!(f, "active:    none")?,
            }
            writeln!(f, "hero:      {}", if s.hero_passed { "passed" } else { "visible" })?;
            writeln!(f, "position:  {}", s.last_position)?;
            writeln!(f, "progress:  {:.2}%", s.progress_percent)?;
        }
        Ok(())
    }
}

struct Replayer {
    controller: Controller<RecordingSurface>,
    frame_interval: Option<Duration>,
    next_frame: Option<Duration>,
    frames: u64,
    entries: Vec<LogEntry>,
}

impl Replayer {
    fn collect(&mut self) {
        let at_ms = self.controller.now().as_millis() as u64;
        self.entries.extend(
            self.controller
                .surface_mut()
                .drain_log()
                .into_iter()
                .map(|mutation| LogEntry { at_ms, mutation }),
        );
    }

    /// Fire timers and automatic frames up to and including `until`, in time order
    fn run_until(&mut self, until: Duration) {
        loop {
            let timer = self.controller.next_deadline().filter(|d| *d <= until);
            let frame = self.next_frame.filter(|d| *d <= until);
            match (timer, frame) {
                (Some(t), Some(fr)) if t <= fr => self.fire_timers(t),
                (_, Some(fr)) => self.deliver_frame(fr),
                (Some(t), None) => self.fire_timers(t),
                (None, None) => break,
            }
        }
        self.controller.advance(until);
        self.collect();
    }

    fn fire_timers(&mut self, at: Duration) {
        let response = self.controller.advance(at);
        self.collect();
        self.request_frame(response.request_frame);
    }

    fn deliver_frame(&mut self, at: Duration) {
        self.next_frame = None;
        self.frames += 1;
        let response = self.controller.dispatch(at, PageEvent::Frame);
        self.collect();
        self.request_frame(response.request_frame);
    }

    fn request_frame(&mut self, requested: bool) {
        if !requested || self.next_frame.is_some() {
            return;
        }
        if let Some(interval) = self.frame_interval {
            self.next_frame = Some(self.controller.now() + interval);
        }
    }

    fn step(&mut self, step: &Step) {
        let at = Duration::from_millis(step.at_ms);
        self.run_until(at);
        if matches!(step.event, PageEvent::Frame) {
            self.next_frame = None;
            self.frames += 1;
        }
        let response = self.controller.dispatch(at, step.event.clone());
        self.collect();
        self.request_frame(response.request_frame);
    }
}

/// Run a trace through a fresh controller
pub fn replay(config: &AppConfig, trace: &Trace) -> ReplayReport {
    let Some(controller) = Controller::attach(
        config,
        trace.layout.clone(),
        trace.viewport,
        RecordingSurface::new(),
    ) else {
        warn!("trace layout has no primary header or secondary bar");
        return ReplayReport {
            attached: false,
            frames: 0,
            entries: Vec::new(),
            snapshot: None,
        };
    };

    let mut replayer = Replayer {
        controller,
        frame_interval: trace.frame_interval_ms.map(Duration::from_millis),
        next_frame: None,
        frames: 0,
        entries: Vec::new(),
    };
    replayer.collect();

    for step in &trace.steps {
        replayer.step(step);
    }

    let last = trace.steps.last().map_or(0, |s| s.at_ms);
    replayer.run_until(Duration::from_millis(last + trace.settle_ms));

    debug!(
        steps = trace.steps.len(),
        mutations = replayer.entries.len(),
        frames = replayer.frames,
        "trace replayed"
    );

    ReplayReport {
        attached: true,
        frames: replayer.frames,
        snapshot: Some(replayer.controller.snapshot()),
        entries: replayer.entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselRunState;
    use crate::header::HeaderVisibility;
    use crate::page::Region;
    use crate::surface::Class;

    const HIDE_THEN_IDLE: &str = r#"
        frame_interval_ms = 16
        settle_ms = 400

        [layout]
        carousel_links = 5

        [viewport]
        width = 1024.0
        height = 800.0
        document_height = 2000.0

        [[steps]]
        at_ms = 0
        event = { type = "scroll", top = 250.0 }

        [[steps]]
        at_ms = 100
        event = { type = "scroll", top = 50.0 }
    "#;

    #[test]
    fn test_toml_trace_replays_with_auto_frames() {
        let trace = Trace::from_toml(HIDE_THEN_IDLE).unwrap();
        let report = replay(&AppConfig::default(), &trace);

        assert!(report.attached);
        assert!(report.frames >= 2);

        let hidden_at = report
            .entries
            .iter()
            .find(|e| {
                e.mutation
                    == Mutation::AddClass {
                        region: Region::SecondaryBar,
                        class: Class::HeaderHidden,
                    }
            })
            .map(|e| e.at_ms);
        assert_eq!(hidden_at, Some(16));

        let shown_at = report
            .entries
            .iter()
            .find(|e| {
                e.mutation
                    == Mutation::RemoveClass {
                        region: Region::SecondaryBar,
                        class: Class::HeaderHidden,
                    }
            })
            .map(|e| e.at_ms);
        assert_eq!(shown_at, Some(116));

        let snapshot = report.snapshot.unwrap();
        assert_eq!(snapshot.header, HeaderVisibility::Shown);
        assert_eq!(snapshot.carousel, CarouselRunState::Running);
        assert_eq!(snapshot.last_position, 50.0);
    }

    #[test]
    fn test_json_trace_with_explicit_frames() {
        let json = r#"{
            "layout": { "carousel_links": 3 },
            "viewport": { "width": 1024, "height": 800, "document_height": 2000 },
            "steps": [
                { "at_ms": 0, "event": { "type": "scroll", "top": 600 } },
                { "at_ms": 16, "event": { "type": "frame" } },
                { "at_ms": 20, "event": { "type": "key", "key": "ArrowRight", "in_secondary_bar": true } }
            ]
        }"#;
        let trace = Trace::parse(Path::new("trace.json"), json).unwrap();
        let report = replay(&AppConfig::default(), &trace);
        let snapshot = report.snapshot.unwrap();

        assert_eq!(report.frames, 1);
        assert_eq!(snapshot.header, HeaderVisibility::Hidden);
        assert_eq!(snapshot.active_link, Some(0));
        assert_eq!(snapshot.progress_percent, 50.0);
    }

    #[test]
    fn test_idle_timer_stamped_with_deadline() {
        let trace = Trace::from_toml(
            r#"
            settle_ms = 1000
            [viewport]
            width = 1024.0
            height = 800.0
            document_height = 2000.0
            [[steps]]
            at_ms = 0
            event = { type = "scroll", top = 30.0 }
            [[steps]]
            at_ms = 16
            event = { type = "frame" }
            "#,
        )
        .unwrap();
        let report = replay(&AppConfig::default(), &trace);

        // 30px down pauses the carousel; scroll stop resumes it 150ms after the scroll
        let resumed: Vec<u64> = report
            .entries
            .iter()
            .filter(|e| {
                matches!(
                    e.mutation,
                    Mutation::SetStyle {
                        region: Region::CarouselTrack,
                        ..
                    }
                )
            })
            .map(|e| e.at_ms)
            .collect();
        assert_eq!(resumed, vec![16, 150]);
    }

    #[test]
    fn test_missing_header_reports_detached() {
        let trace = Trace::from_toml(
            r#"
            [layout]
            primary_header = false
            [viewport]
            width = 1024.0
            height = 800.0
            document_height = 2000.0
            "#,
        )
        .unwrap();
        let report = replay(&AppConfig::default(), &trace);
        assert!(!report.attached);
        assert!(report.entries.is_empty());
        assert!(report.to_string().contains("not attached"));
    }

    #[test]
    fn test_out_of_order_steps_rejected() {
        let err = Trace::from_toml(
            r#"
            [viewport]
            width = 1024.0
            height = 800.0
            document_height = 2000.0
            [[steps]]
            at_ms = 50
            event = { type = "frame" }
            [[steps]]
            at_ms = 10
            event = { type = "frame" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::Trace(_)));
    }

    #[test]
    fn test_bundled_demo_traces() {
        let trace = Trace::from_toml(include_str!("../../../demos/hide-and-return.toml")).unwrap();
        let report = replay(&AppConfig::default(), &trace);
        let snapshot = report.snapshot.unwrap();
        assert_eq!(snapshot.header, HeaderVisibility::Shown);
        assert_eq!(snapshot.carousel, CarouselRunState::Running);
        assert_eq!(snapshot.active_link, Some(0));
        assert!(snapshot.hero_passed);
        assert_eq!(snapshot.last_position, 80.0);
        assert!(report
            .entries
            .iter()
            .any(|e| matches!(e.mutation, Mutation::RemoveRipple { id: 1 })));

        let trace = Trace::parse(
            Path::new("resize.json"),
            include_str!("../../../demos/resize.json"),
        )
        .unwrap();
        let report = replay(&AppConfig::default(), &trace);
        let shown_at = report
            .entries
            .iter()
            .find(|e| {
                e.mutation
                    == Mutation::RemoveClass {
                        region: Region::PrimaryHeader,
                        class: Class::Hidden,
                    }
            })
            .map(|e| e.at_ms);
        // Last resize at 700ms, settled 250ms later
        assert_eq!(shown_at, Some(950));
    }
}
