use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

/// Filled cells for `percent` of `width`
pub fn filled_cells(width: u16, percent: f64) -> u16 {
    let percent = percent.clamp(0.0, 100.0);
    ((width as f64) * percent / 100.0).round() as u16
}

pub struct ProgressWidget;

impl ProgressWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let surface = app.surface();
        let theme = &app.theme;
        if !surface.progress_mounted() {
            frame.render_widget(Paragraph::new("").style(Style::default().bg(theme.bg0)), area);
            return;
        }

        let filled = filled_cells(area.width, surface.progress_percent());
        let line = Line::from(vec![
            Span::styled("━".repeat(filled as usize), Style::default().fg(theme.progress).bg(theme.bg0)),
            Span::styled(
                " ".repeat(area.width.saturating_sub(filled) as usize),
                Style::default().bg(theme.bg0),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_cells() {
        assert_eq!(filled_cells(80, 0.0), 0);
        assert_eq!(filled_cells(80, 50.0), 40);
        assert_eq!(filled_cells(80, 100.0), 80);
        assert_eq!(filled_cells(80, 140.0), 80);
    }
}
