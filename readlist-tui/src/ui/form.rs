use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::mode::{AppMode, FormField};
use crate::ui::layout::Layout;
use crate::ui::status_color;

const FORM_WIDTH: u16 = 60;

/// Render the add/edit popup over the list
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.mode == AppMode::EditForm;
    let form = &app.form;
    let height = if editing { 9 } else { 8 };
    let popup = Layout::popup(area, FORM_WIDTH, height);

    let title = if editing { " Edit book " } else { " Add book " };

    let mut lines = vec![
        Line::from(""),
        text_field("Title", &form.title, form.field == FormField::Title),
        text_field("Author", &form.author, form.field == FormField::Author),
    ];

    if editing {
        let focused = form.field == FormField::Status;
        let mut label_style = Style::default().fg(Color::Gray);
        if focused {
            label_style = label_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(format!("{:>8}: ", "Status"), label_style),
            Span::styled(
                format!("< {} >", form.status.label()),
                Style::default().fg(status_color(form.status)),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Title is required",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(app.mode.color())),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn text_field<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut spans = vec![
        Span::styled(format!("{:>8}: ", label), label_style),
        Span::raw(value),
    ];
    if focused {
        spans.push(Span::styled("_", Style::default().fg(Color::Green))); // Cursor
    }
    Line::from(spans)
}
