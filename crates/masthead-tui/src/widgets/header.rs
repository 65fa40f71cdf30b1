use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub struct HeaderWidget;

impl HeaderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.height == 0 {
            return;
        }
        let theme = &app.theme;

        // Faded until the appear animation finishes on the next frame
        let (title_fg, tagline_fg) = if app.surface().header_fading() {
            (theme.grey0, theme.bg3)
        } else {
            (theme.fg1, theme.grey2)
        };

        let line = Line::from(vec![
            Span::styled(
                " masthead ",
                Style::default().fg(title_fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled("· a header that gets out of the way", Style::default().fg(tagline_fg)),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.bg3))
            .style(Style::default().bg(theme.bg0));

        frame.render_widget(Paragraph::new(line).block(block), area);
    }
}
