use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::page::PageLine;

const HERO_TITLE_ROW: usize = 5;

pub struct ContentWidget;

impl ContentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let first = app.page.first_visible_line(app.scroll_top());

        // "content-adjusted" drops the top padding reserved for the header
        let padding = if app.content_adjusted() { 0 } else { 1 };

        let mut lines: Vec<Line> = (0..padding).map(|_| Line::from("")).collect();
        lines.extend(
            app.page
                .lines()
                .iter()
                .skip(first)
                .take(area.height as usize)
                .map(|line| match line {
                    PageLine::Hero { index } => {
                        let text = if *index == HERO_TITLE_ROW {
                            "   Scroll down. The header will step aside."
                        } else {
                            ""
                        };
                        Line::from(Span::styled(
                            format!("{:<width$}", text, width = area.width as usize),
                            Style::default()
                                .fg(theme.yellow)
                                .bg(theme.hero)
                                .add_modifier(Modifier::BOLD),
                        ))
                    }
                    PageLine::Heading(text) => Line::from(Span::styled(
                        format!("  {}", text),
                        Style::default().fg(theme.aqua).add_modifier(Modifier::BOLD),
                    )),
                    PageLine::Text(text) => {
                        Line::from(Span::styled(format!("  {}", text), Style::default().fg(theme.fg0)))
                    }
                    PageLine::Blank => Line::from(""),
                }),
        );

        let paragraph = Paragraph::new(lines).style(Style::default().bg(theme.bg0));
        frame.render_widget(paragraph, area);
    }
}
