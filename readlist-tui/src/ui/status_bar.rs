use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use readlist_core::Status;

use crate::app::App;
use crate::ui::status_color;

/// Render the status bar (top bar): mode, per-status counts, active filter, time
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mode_color = app.mode.color();
    let mode_name = app.mode.display_name();

    let now = Local::now();
    let time_str = now.format("%H:%M").to_string();

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode_name),
            Style::default()
                .fg(Color::Black)
                .bg(mode_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    for status in Status::ALL {
        spans.push(Span::styled(
            format!("{} {}", status.label(), app.counts.get(status)),
            Style::default().fg(status_color(status)),
        ));
        spans.push(Span::raw("  "));
    }

    spans.push(Span::styled(
        format!("[{}]", app.list.query().filter.label()),
        Style::default().fg(Color::DarkGray),
    ));

    // Right-aligned time
    let width = area.width as usize;
    let current_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding = width.saturating_sub(current_len + time_str.len() + 1);

    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(
        format!("{} ", time_str),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(paragraph, area);
}
