pub mod book_list;
pub mod command_bar;
pub mod form;
pub mod layout;
pub mod search_bar;
pub mod status_bar;

use ratatui::style::Color;
use ratatui::Frame;
use readlist_core::Status;

use crate::app::App;

pub use book_list::BookListPanel;

/// Badge color per status
pub fn status_color(status: Status) -> Color {
    match status {
        Status::Planning => Color::Rgb(0xFF, 0x98, 0x00),
        Status::Reading => Color::Rgb(0x21, 0x96, 0xF3),
        Status::Done => Color::Rgb(0x4C, 0xAF, 0x50),
    }
}

/// Main UI renderer
#[derive(Default)]
pub struct UI {
    pub book_list: BookListPanel,
}

impl UI {
    /// Create a new UI
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the entire UI
    pub fn render(&mut self, f: &mut Frame, app: &mut App) {
        let area = f.area();
        let (status_area, search_area, list_area, command_area) = layout::Layout::main(area);

        status_bar::render(f, status_area, app);
        search_bar::render(f, search_area, app);
        self.book_list.render(f, list_area, app);
        command_bar::render(f, command_area, app);

        if app.mode.is_form() {
            form::render(f, area, app);
        }
    }
}
