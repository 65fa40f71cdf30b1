//! The scroll controller: one value owning every component and the surface.
//!
//! Hosts construct it with [`Controller::attach`] and feed it timestamped
//! [`PageEvent`]s through [`Controller::dispatch`]. Two cadences run side by
//! side:
//!
//! - raw: each `Scroll` updates the progress bar and restarts the idle
//!   countdown immediately
//! - coalesced: the header state machine and the carousel see at most one
//!   sample per `Frame`
//!
//! Timers live on a virtual clock. Before an event is handled every timer due
//! at or before its timestamp fires, each observing its own deadline as "now".

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, trace};

use crate::carousel::{CarouselAdapter, CarouselRunState};
use crate::config::AppConfig;
use crate::effects::Effects;
use crate::event::{PageEvent, Response};
use crate::header::{HeaderMachine, HeaderTransition, HeaderVisibility};
use crate::hero::HeroObserver;
use crate::page::{PageLayout, Viewport};
use crate::progress::ProgressIndicator;
use crate::resize::ResizeReactor;
use crate::scroll::{IdleDetector, ScrollSampler};
use crate::surface::Surface;
use crate::timer::{TimerKind, TimerQueue};

/// Work deferred to the next rendering frame, run in queue order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameTask {
    /// Process the coalesced scroll sample
    Sample,
    /// Finish the header appear animation
    HeaderAppear,
}

/// Observable controller state at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub header: HeaderVisibility,
    pub carousel: CarouselRunState,
    pub active_link: Option<usize>,
    pub hero_passed: bool,
    pub scrolled: bool,
    pub last_position: f64,
    pub progress_percent: f64,
}

#[derive(Debug)]
pub struct Controller<S: Surface> {
    layout: PageLayout,
    viewport: Viewport,
    surface: S,
    now: Duration,
    timers: TimerQueue,
    frame_tasks: Vec<FrameTask>,
    hide_pulse: Duration,
    sampler: ScrollSampler,
    idle: IdleDetector,
    header: HeaderMachine,
    resize: ResizeReactor,
    hero: Option<HeroObserver>,
    progress: Option<ProgressIndicator>,
    carousel: CarouselAdapter,
    effects: Effects,
}

impl<S: Surface> Controller<S> {
    /// Attach to a page. Returns `None` when the primary header or the
    /// secondary bar is missing; nothing is written to the surface then.
    pub fn attach(config: &AppConfig, layout: PageLayout, viewport: Viewport, mut surface: S) -> Option<Self> {
        if !layout.supports_controller() {
            debug!(?layout, "header regions missing, controller not attached");
            return None;
        }

        let progress = config
            .progress
            .enabled
            .then(|| ProgressIndicator::new(&config.progress));
        if let Some(progress) = &progress {
            progress.mount(&mut surface);
        }

        let effects = Effects::new(config.effects.clone(), layout.carousel_links);
        effects.setup(&mut surface);

        debug!(
            links = layout.carousel_links,
            hero = layout.hero,
            width = viewport.width,
            "controller attached"
        );

        Some(Self {
            sampler: ScrollSampler::new(viewport.scroll_top),
            idle: IdleDetector::new(config.timing.idle_delay()),
            header: HeaderMachine::new(config.header.clone(), layout.main),
            resize: ResizeReactor::new(config.timing.resize_delay(), viewport.width),
            hero: layout.hero.then(|| HeroObserver::new(config.hero.clone())),
            carousel: CarouselAdapter::new(
                config.carousel.clone(),
                layout.carousel_track,
                layout.carousel_links,
            ),
            hide_pulse: config.header.hide_pulse(),
            progress,
            effects,
            layout,
            viewport,
            surface,
            now: Duration::ZERO,
            timers: TimerQueue::new(),
            frame_tasks: Vec::new(),
        })
    }

    /// Handle one event at time `at`, after firing every timer due by then
    pub fn dispatch(&mut self, at: Duration, event: PageEvent) -> Response {
        self.fire_due_timers(at);
        trace!(?event, at_ms = self.now.as_millis() as u64, "dispatch");

        let mut prevent_default = false;
        match event {
            PageEvent::Scroll { top } => self.on_scroll(top),
            PageEvent::Frame => self.on_frame(),
            PageEvent::Resize { width, height } => {
                self.viewport.width = width;
                self.viewport.height = height;
                self.resize.on_resize(self.now, &mut self.timers);
            }
            PageEvent::DocumentResize { height } => {
                self.viewport.document_height = height;
            }
            PageEvent::Intersection { entries } => {
                if let Some(hero) = self.hero.as_mut() {
                    hero.on_entries(&entries, &mut self.surface);
                }
            }
            PageEvent::Key {
                key,
                in_secondary_bar,
            } => {
                prevent_default = self.carousel.on_key(key, in_secondary_bar, &mut self.surface);
            }
            PageEvent::PointerEnter { link } => {
                self.effects
                    .on_pointer_enter(link, self.now, &mut self.surface, &mut self.timers);
            }
            PageEvent::Click(click) => {
                self.effects
                    .on_click(&click, self.now, &mut self.surface, &mut self.timers);
            }
            PageEvent::SelectLink { index } => {
                self.carousel.select(index, &mut self.surface);
            }
        }

        Response {
            request_frame: self.needs_frame(),
            prevent_default,
        }
    }

    /// Move the clock to `now`, firing due timers without an event
    pub fn advance(&mut self, now: Duration) -> Response {
        self.fire_due_timers(now);
        Response {
            request_frame: self.needs_frame(),
            prevent_default: false,
        }
    }

    /// Feed hero geometry for hosts without a native intersection observer.
    /// `hero_top` is relative to the viewport top.
    pub fn observe_hero(&mut self, hero_top: f64, hero_height: f64) {
        let viewport_height = self.viewport.height;
        if let Some(hero) = self.hero.as_mut() {
            if let Some(entry) = hero.observe(hero_top, hero_height, viewport_height) {
                hero.on_entries(&[entry], &mut self.surface);
            }
        }
    }

    fn on_scroll(&mut self, top: f64) {
        self.viewport.scroll_top = top;
        if self.sampler.on_scroll(top) {
            self.frame_tasks.push(FrameTask::Sample);
        }
        self.idle.on_scroll(self.now, &mut self.timers);
        if let Some(progress) = self.progress.as_mut() {
            progress.update(&self.viewport, &mut self.surface);
        }
    }

    fn on_frame(&mut self) {
        for task in std::mem::take(&mut self.frame_tasks) {
            match task {
                FrameTask::Sample => {
                    let Some(sample) = self.sampler.on_frame() else {
                        continue;
                    };
                    let transition = self.header.on_sample(&sample, &mut self.surface);
                    self.apply_transition(transition);
                    self.carousel.on_velocity(sample.delta(), &mut self.surface);
                }
                FrameTask::HeaderAppear => self.header.finish_appear(&mut self.surface),
            }
        }
    }

    fn apply_transition(&mut self, transition: Option<HeaderTransition>) {
        match transition {
            Some(HeaderTransition::Hidden) => {
                self.timers
                    .schedule(TimerKind::HidePulseReset, self.now + self.hide_pulse);
            }
            Some(HeaderTransition::Shown(_)) => self.frame_tasks.push(FrameTask::HeaderAppear),
            None => {}
        }
    }

    fn fire_due_timers(&mut self, now: Duration) {
        let now = now.max(self.now);
        while let Some((deadline, kind)) = self.timers.pop_due(now) {
            self.now = deadline.max(self.now);
            self.fire(kind);
        }
        self.now = now;
    }

    fn fire(&mut self, kind: TimerKind) {
        trace!(?kind, at_ms = self.now.as_millis() as u64, "timer fired");
        match kind {
            TimerKind::ScrollIdle => {
                let stopped = self.idle.expire(self.viewport.scroll_top);
                debug!(position = stopped.position, "scroll stopped");
                let transition = self.header.on_scroll_stopped(stopped.position, &mut self.surface);
                self.apply_transition(transition);
                self.carousel.resume(&mut self.surface);
            }
            TimerKind::ResizeSettled => {
                if self.resize.settle(self.viewport.width) {
                    let transition = self.header.force_show(&mut self.surface);
                    self.apply_transition(transition);
                }
            }
            TimerKind::HidePulseReset => self.header.finish_pulse(&mut self.surface),
            TimerKind::HoverReset(link) => self.effects.finish_hover(link, &mut self.surface),
            TimerKind::RippleExpired(id) => self.effects.expire_ripple(id, &mut self.surface),
        }
    }

    /// Work is queued for the next frame
    #[inline]
    pub fn needs_frame(&self) -> bool {
        !self.frame_tasks.is_empty()
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn header_visibility(&self) -> HeaderVisibility {
        self.header.state()
    }

    pub fn carousel_run_state(&self) -> CarouselRunState {
        self.carousel.run_state()
    }

    pub fn active_link(&self) -> Option<usize> {
        self.carousel.active()
    }

    pub fn hero_passed(&self) -> bool {
        self.hero.as_ref().is_some_and(HeroObserver::is_passed)
    }

    /// Position recorded by the last coalesced sample
    pub fn last_position(&self) -> f64 {
        self.sampler.last_position()
    }

    pub fn progress_percent(&self) -> f64 {
        self.progress.as_ref().map_or(0.0, ProgressIndicator::percent)
    }

    pub fn last_width(&self) -> f64 {
        self.resize.last_width()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            header: self.header_visibility(),
            carousel: self.carousel_run_state(),
            active_link: self.active_link(),
            hero_passed: self.hero_passed(),
            scrolled: self.header.is_scrolled(),
            last_position: self.last_position(),
            progress_percent: self.progress_percent(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
