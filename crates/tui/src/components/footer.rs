use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, AppMode};
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let left = "q quit  p pause  c/r/f/u set  t theme";

    let mut right_parts: Vec<String> = Vec::new();
    if let AppMode::Paused = app.mode {
        right_parts.push("PAUSED".to_string());
    }
    right_parts.push(app.state.label().to_string());
    right_parts.push(format!("src:{}", app.source_name));
    let right = right_parts.join("  ");

    let available = area.width as usize;
    let gap = available.saturating_sub(left.len() + right.chars().count() + 4);

    let spans = vec![
        Span::styled(format!("  {left}"), Style::default().fg(theme.text_secondary)),
        Span::raw(" ".repeat(gap)),
        Span::styled(format!("{right}  "), Style::default().fg(theme.text_primary)),
    ];

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg_page));
    frame.render_widget(paragraph, area);
}
