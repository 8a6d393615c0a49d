use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use readlist_core::{Book, Status};

use crate::app::App;
use crate::ui::status_color;

/// Book list panel state
#[derive(Default)]
pub struct BookListPanel {
    /// Scroll/selection state handed to ratatui
    pub state: ListState,
}

impl BookListPanel {
    /// Render the visible books
    pub fn render(&mut self, f: &mut Frame, area: Rect, app: &mut App) {
        let border_color = if app.mode.is_form() {
            Color::DarkGray
        } else {
            app.mode.color()
        };

        let has_books = !app.list.books().is_empty();
        let selected = app.selected;
        let visible = app.list.visible();
        let title = format!(" Books ({}) ", visible.len());

        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(Style::default().fg(border_color));

        if visible.is_empty() {
            let (headline, hint) = if !has_books {
                ("No books yet", "Press 'a' to add your first book")
            } else {
                ("No books match", "Esc clears the search, 0 shows every status")
            };

            let empty_msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    headline,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
            ])
            .block(block)
            .alignment(Alignment::Center);

            f.render_widget(empty_msg, area);
            self.state.select(None);
            return;
        }

        let items: Vec<ListItem> = visible.iter().map(|book| Self::render_book_item(book)).collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        self.state.select(Some(selected));
        f.render_stateful_widget(list, area, &mut self.state);
    }

    /// Render a single book as a list item
    fn render_book_item(book: &Book) -> ListItem<'static> {
        let color = status_color(book.status);

        let mut spans = vec![
            Span::styled(
                format!("{} ", status_icon(book.status)),
                Style::default().fg(color),
            ),
            Span::styled(book.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ];

        if let Some(author) = &book.author {
            spans.push(Span::styled(
                format!("  by {}", author),
                Style::default().fg(Color::Gray),
            ));
        }

        spans.push(Span::styled(
            format!("  {}", book.status.label()),
            Style::default().fg(color),
        ));

        if let Some(added) = book.created_at_utc() {
            spans.push(Span::styled(
                format!("  {}", added.format("%Y-%m-%d")),
                Style::default().fg(Color::DarkGray),
            ));
        }

        ListItem::new(Line::from(spans))
    }
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Planning => "[ ]",
        Status::Reading => "[~]",
        Status::Done => "[x]",
    }
}
