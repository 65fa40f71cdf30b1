//! Demo application state.
//!
//! Owns the controller attached to a [`TerminalSurface`] and translates
//! terminal input into page events. Terminal time is measured from app start
//! and handed to the controller as its clock.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use masthead_core::carousel::{CarouselRunState, NavKey};
use masthead_core::effects::LinkClick;
use masthead_core::{AppConfig, Class, Controller, PageEvent, Rect, Region, Response, Snapshot};
use ratatui::layout::{Constraint, Direction, Layout, Rect as Area};
use tracing::debug;

use crate::page::{DemoPage, COL_PX, HEADER_ROWS, ROW_PX};
use crate::scroll::{ScrollAnimator, ScrollConfigExt};
use crate::surface::TerminalSurface;
use crate::theme::Theme;
use crate::widgets::{link_slots, links_area, LinkSlot};

/// The running carousel advances one link per step
const MARQUEE_STEP: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    SecondaryBar,
}

/// Screen areas, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub progress: Area,
    pub header: Area,
    pub bar: Area,
    pub content: Area,
    pub status: Area,
}

impl ScreenLayout {
    /// The header collapses to zero rows while hidden
    pub fn new(area: Area, header_hidden: bool) -> Self {
        let header_rows = if header_hidden { 0 } else { HEADER_ROWS };
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(header_rows),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);
        Self {
            progress: chunks[0],
            header: chunks[1],
            bar: chunks[2],
            content: chunks[3],
            status: chunks[4],
        }
    }
}

pub struct App {
    pub page: DemoPage,
    pub theme: Theme,
    pub focus: Focus,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub pending_key: Option<char>,
    controller: Controller<TerminalSurface>,
    animator: ScrollAnimator,
    started: Instant,
    size: (u16, u16),
    carousel_shift: usize,
    last_marquee: Duration,
    hovered: Option<usize>,
}

impl App {
    /// Build the demo page for a `cols` x `rows` terminal and attach the controller
    pub fn new(config: &AppConfig, cols: u16, rows: u16) -> Result<Self> {
        let page = DemoPage::default();
        let controller = Controller::attach(
            config,
            page.layout(),
            page.viewport(cols, rows),
            TerminalSurface::new(),
        )
        .context("demo page is missing its header regions")?;

        Ok(Self {
            page,
            theme: Theme::default(),
            focus: Focus::Page,
            should_quit: false,
            status_message: None,
            pending_key: None,
            controller,
            animator: ScrollAnimator::new(config.ui.scroll.clone()),
            started: Instant::now(),
            size: (cols, rows),
            carousel_shift: 0,
            last_marquee: Duration::ZERO,
            hovered: None,
        })
    }

    fn clock(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    fn dispatch(&mut self, now: Instant, event: PageEvent) -> Response {
        let at = self.clock(now);
        let response = self.controller.dispatch(at, event);
        self.take_requests();
        response
    }

    pub fn controller(&self) -> &Controller<TerminalSurface> {
        &self.controller
    }

    pub fn surface(&self) -> &TerminalSurface {
        self.controller.surface()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.controller.snapshot()
    }

    pub fn scroll_top(&self) -> f64 {
        self.controller.viewport().scroll_top
    }

    fn max_scroll(&self) -> f64 {
        self.controller.viewport().max_scroll()
    }

    pub fn content_adjusted(&self) -> bool {
        self.surface().has_class(Region::Main, Class::ContentAdjusted)
    }

    pub fn carousel_shift(&self) -> usize {
        self.carousel_shift
    }

    pub fn layout(&self) -> ScreenLayout {
        let (cols, rows) = self.size;
        ScreenLayout::new(Area::new(0, 0, cols, rows), self.surface().header_hidden())
    }

    /// Scroll work or a frame is pending; poll at animation rate
    pub fn needs_fast_update(&self) -> bool {
        self.animator.needs_update() || self.controller.needs_frame()
    }

    /// How long the event loop may block before the next tick is due
    pub fn poll_timeout(&self, now: Instant, tick_rate: Duration) -> Duration {
        if self.needs_fast_update() {
            return self.animator.config().animation_tick_duration();
        }
        match self.controller.next_deadline() {
            Some(deadline) => deadline.saturating_sub(self.clock(now)).min(tick_rate),
            None => tick_rate,
        }
    }

    /// Advance animation, timers and frames to `now`
    pub fn on_tick(&mut self, now: Instant) {
        self.pump_scroll(now);

        let at = self.clock(now);
        self.controller.advance(at);
        if self.controller.needs_frame() {
            self.dispatch(now, PageEvent::Frame);
        }
        self.take_requests();
        self.advance_marquee(at);
    }

    /// Feed the animator's position to the controller as a raw scroll
    fn pump_scroll(&mut self, now: Instant) {
        let max = self.max_scroll();
        let position = if self.animator.needs_update() {
            self.animator.update(now, max)
        } else {
            self.animator.position()
        };
        if position != self.scroll_top() {
            self.dispatch(now, PageEvent::Scroll { top: position });
            let top = self.page.hero_top(position);
            self.controller.observe_hero(top, self.page.hero_height());
        }
    }

    fn advance_marquee(&mut self, at: Duration) {
        let links = self.page.links().len();
        let paused = self.controller.carousel_run_state() == CarouselRunState::Paused
            || self.focus == Focus::SecondaryBar;
        if links == 0 || paused {
            self.last_marquee = at;
            return;
        }
        if at.saturating_sub(self.last_marquee) >= MARQUEE_STEP {
            self.carousel_shift = (self.carousel_shift + 1) % links;
            self.last_marquee = at;
        }
    }

    fn take_requests(&mut self) {
        let surface = self.controller.surface_mut();
        let into_view = surface.take_scroll_into_view();
        let activated = surface.take_activated();

        if let Some(Region::CarouselLink(link)) = into_view {
            self.center_link(link);
        }
        if let Some(Region::CarouselLink(link)) = activated {
            if let Some(label) = self.page.links().get(link) {
                debug!(link, "link followed");
                self.status_message = Some(format!("Opened {}", label));
            }
        }
    }

    /// Shift the carousel so `link` sits in the middle of the visible links
    fn center_link(&mut self, link: usize) {
        let links = self.page.links().len();
        if links == 0 {
            return;
        }
        let bar = self.layout().bar;
        let (left, width) = links_area(bar, self.surface().header_hidden());
        let visible = link_slots(self.page.links(), link, left, width).len().max(1);
        self.carousel_shift = (link + links - (visible / 2).min(links - 1)) % links;
    }

    /// Link under the terminal cell, if any
    pub fn link_at(&self, column: u16, row: u16) -> Option<LinkSlot> {
        let bar = self.layout().bar;
        if row != bar.y {
            return None;
        }
        let (left, width) = links_area(bar, self.surface().header_hidden());
        link_slots(self.page.links(), self.carousel_shift, left, width)
            .into_iter()
            .find(|slot| column >= slot.x && column < slot.x + slot.width)
    }

    pub fn scroll_steps(&mut self, steps: i32, now: Instant) {
        let max = self.max_scroll();
        self.animator.scroll_steps(steps, max);
        self.pump_scroll(now);
    }

    pub fn scroll_pages(&mut self, pages: f64, now: Instant) {
        let max = self.max_scroll();
        let height = self.controller.viewport().height;
        self.animator.scroll_pages(pages, height, max);
        self.pump_scroll(now);
    }

    pub fn jump_to_top(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.animator.scroll_to(0.0, max, now);
        self.pump_scroll(now);
    }

    pub fn jump_to_bottom(&mut self, now: Instant) {
        let max = self.max_scroll();
        self.animator.scroll_to(max, max, now);
        self.pump_scroll(now);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Page => Focus::SecondaryBar,
            Focus::SecondaryBar => Focus::Page,
        };
        self.status_message = None;
    }

    /// Deliver a key to the carousel; returns whether it was consumed
    pub fn nav_key(&mut self, key: NavKey, now: Instant) -> bool {
        let in_secondary_bar = self.focus == Focus::SecondaryBar;
        self.dispatch(
            now,
            PageEvent::Key {
                key,
                in_secondary_bar,
            },
        )
        .prevent_default
    }

    pub fn resize(&mut self, cols: u16, rows: u16, now: Instant) {
        self.size = (cols, rows);
        let viewport = self.page.viewport(cols, rows);
        self.dispatch(
            now,
            PageEvent::Resize {
                width: viewport.width,
                height: viewport.height,
            },
        );

        let max = self.max_scroll();
        if self.scroll_top() > max {
            self.animator.set_position(max);
            self.pump_scroll(now);
        }
    }

    pub fn mouse_wheel(&mut self, notches: i32, now: Instant) {
        self.scroll_steps(notches, now);
    }

    pub fn mouse_move(&mut self, column: u16, row: u16, now: Instant) {
        let link = self.link_at(column, row).map(|slot| slot.link);
        if link != self.hovered {
            if let Some(link) = link {
                self.dispatch(now, PageEvent::PointerEnter { link });
            }
            self.hovered = link;
        }
    }

    pub fn click(&mut self, column: u16, row: u16, now: Instant) {
        let Some(slot) = self.link_at(column, row) else {
            return;
        };
        let bar = self.layout().bar;
        let click = LinkClick {
            link: slot.link,
            x: column as f64 * COL_PX,
            y: row as f64 * ROW_PX,
            rect: Rect::new(
                slot.x as f64 * COL_PX,
                bar.y as f64 * ROW_PX,
                slot.width as f64 * COL_PX,
                ROW_PX,
            ),
        };
        self.dispatch(now, PageEvent::Click(click));
        self.dispatch(now, PageEvent::SelectLink { index: slot.link });
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}
