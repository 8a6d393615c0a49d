use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::mode::AppMode;

/// Render the search box above the list
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let active = app.mode == AppMode::Search;
    let search = &app.list.query().search;

    let border_color = if active {
        app.mode.color()
    } else {
        Color::DarkGray
    };

    let line = if search.is_empty() && !active {
        Line::from(Span::styled(
            "Search by title or author (/)",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = vec![Span::raw(search.as_str())];
        if active {
            spans.push(Span::styled("_", Style::default().fg(Color::Green))); // Cursor
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(Style::default().fg(border_color)),
    );

    f.render_widget(paragraph, area);
}
