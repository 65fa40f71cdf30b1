use masthead_core::carousel::CarouselRunState;
use masthead_core::{Class, Region};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

/// Shown at the left of the bar while the primary header is hidden
pub const COMPACT_TITLE: &str = " masthead › ";

/// Columns kept free at the right for the play-state marker
const MARKER_COLS: u16 = 3;

/// Where one link lands on the bar row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSlot {
    pub link: usize,
    pub x: u16,
    pub width: u16,
}

/// Lay out links starting from `shift`, wrapping around, until `width` runs out
pub fn link_slots(labels: &[String], shift: usize, left: u16, width: u16) -> Vec<LinkSlot> {
    let mut slots = Vec::new();
    if labels.is_empty() {
        return slots;
    }
    let end = left.saturating_add(width);
    let mut x = left;
    for k in 0..labels.len() {
        let link = (shift + k) % labels.len();
        let w = labels[link].width() as u16 + 2;
        if x.saturating_add(w) > end {
            break;
        }
        slots.push(LinkSlot { link, x, width: w });
        x += w + 1;
    }
    slots
}

/// Left column and width available to links on the bar
pub fn links_area(area: Rect, header_hidden: bool) -> (u16, u16) {
    let prefix = if header_hidden { COMPACT_TITLE.width() as u16 } else { 1 };
    let left = area.x + prefix.min(area.width);
    let width = area.width.saturating_sub(prefix + MARKER_COLS);
    (left, width)
}

pub struct SecondaryBarWidget;

impl SecondaryBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let surface = app.surface();
        let header_hidden = surface.header_hidden();
        let focused = app.focus == Focus::SecondaryBar;

        // "scrolled" lifts the bar off the page
        let bar_bg = if surface.has_class(Region::SecondaryBar, Class::Scrolled) {
            theme.bg2
        } else {
            theme.bg1
        };
        let mut base = Style::default().fg(theme.fg0).bg(bar_bg);
        if focused {
            base = base.fg(theme.fg1).add_modifier(Modifier::BOLD);
        }
        if surface.bar_pulsing() {
            base = base.add_modifier(Modifier::DIM);
        }

        let mut spans = Vec::new();
        if header_hidden {
            spans.push(Span::styled(
                COMPACT_TITLE,
                base.fg(theme.accent).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(" ", base));
        }

        let (left, width) = links_area(area, header_hidden);
        let mut x = left;
        for slot in link_slots(app.page.links(), app.carousel_shift(), left, width) {
            let label = &app.page.links()[slot.link];
            let mut style = base;
            // The indicator is the underline under the active link
            if surface.has_indicator(slot.link) && surface.active_link() == Some(slot.link) {
                style = style.fg(theme.active).add_modifier(Modifier::UNDERLINED);
            }
            if surface.is_hovered(slot.link) {
                style = style.bg(theme.hover).add_modifier(Modifier::BOLD);
            }
            if surface.has_ripple(slot.link) {
                style = style.bg(theme.ripple).fg(theme.bg0);
            }
            if slot.x > x {
                spans.push(Span::styled(" ".repeat((slot.x - x) as usize), base));
            }
            spans.push(Span::styled(format!(" {} ", label), style));
            x = slot.x + slot.width;
        }

        let used = x.saturating_sub(area.x);
        let fill = area.width.saturating_sub(used + MARKER_COLS);
        spans.push(Span::styled(" ".repeat(fill as usize), base));

        let marker = match surface.play_state() {
            CarouselRunState::Running => "▶",
            CarouselRunState::Paused => "⏸",
        };
        let marker_style = if surface.has_class(Region::SecondaryBar, Class::HeroPassed) {
            base.fg(theme.yellow)
        } else {
            base.fg(theme.grey1)
        };
        spans.push(Span::styled(format!(" {} ", marker), marker_style));

        let paragraph = Paragraph::new(Line::from(spans)).style(base);
        frame.render_widget(paragraph, area);
    }
}
