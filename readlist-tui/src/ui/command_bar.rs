use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::mode::AppMode;

/// Render the command bar (bottom bar)
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let content = if let Some(ref notice) = app.notice {
        let color = if notice.is_error() {
            Color::Red
        } else {
            Color::Reset
        };
        Line::from(Span::styled(notice.text(), Style::default().fg(color)))
    } else {
        let hints = match app.mode {
            AppMode::Normal => {
                "a: add | e: edit | d: delete | Enter: next status | /: search | f: filter | r: refresh | q: quit"
            }
            AppMode::Search => "type to search | Enter: keep | Esc: clear",
            AppMode::AddForm => "Tab: next field | Enter: save | Esc: cancel",
            AppMode::EditForm => "Tab: next field | \u{2190}/\u{2192}: status | Enter: save | Esc: cancel",
            AppMode::ConfirmDelete => "y: delete | any other key: cancel",
        };

        Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
    };

    f.render_widget(Paragraph::new(content), area);
}
