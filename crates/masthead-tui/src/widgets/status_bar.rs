use masthead_core::carousel::CarouselRunState;
use masthead_core::header::HeaderVisibility;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let snapshot = app.snapshot();

        let focus_str = match app.focus {
            Focus::Page => "PAGE",
            Focus::SecondaryBar => "BAR",
        };
        let header_str = match snapshot.header {
            HeaderVisibility::Shown => "header shown",
            HeaderVisibility::Hidden => "header hidden",
        };
        let carousel_str = match snapshot.carousel {
            CarouselRunState::Running => "carousel running",
            CarouselRunState::Paused => "carousel paused",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} | {} | {} | {:>3.0}%{}",
                focus_str,
                header_str,
                carousel_str,
                snapshot.progress_percent,
                if snapshot.hero_passed { " | hero passed" } else { "" }
            )
        };

        let help_hint = " q:quit j/k:scroll Tab:bar h/l:links ";
        let padding_len = area
            .width
            .saturating_sub(status_text.width() as u16 + help_hint.width() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
