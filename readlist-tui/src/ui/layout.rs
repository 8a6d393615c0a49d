use ratatui::layout::{Constraint, Direction, Flex, Layout as RatatuiLayout, Rect};

/// Layout manager for the TUI
pub struct Layout;

impl Layout {
    /// Create the main layout: status bar, search box, book list, command bar
    ///
    /// Returns: (status_area, search_area, list_area, command_area)
    pub fn main(area: Rect) -> (Rect, Rect, Rect, Rect) {
        let chunks = RatatuiLayout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Status bar
                Constraint::Length(3), // Search box
                Constraint::Min(0),    // Book list
                Constraint::Length(1), // Command bar
            ])
            .split(area);

        (chunks[0], chunks[1], chunks[2], chunks[3])
    }

    /// Centered popup of the given size, clipped to `area`
    pub fn popup(area: Rect, width: u16, height: u16) -> Rect {
        let [row] = RatatuiLayout::vertical([Constraint::Length(height.min(area.height))])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = RatatuiLayout::horizontal([Constraint::Length(width.min(area.width))])
            .flex(Flex::Center)
            .areas(row);
        popup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_fills_area() {
        let area = Rect::new(0, 0, 80, 24);
        let (status, search, list, command) = Layout::main(area);
        assert_eq!(status.height, 2);
        assert_eq!(search.height, 3);
        assert_eq!(command.height, 1);
        assert_eq!(list.height, 24 - 2 - 3 - 1);
    }

    #[test]
    fn test_popup_is_centered_and_clipped() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = Layout::popup(area, 40, 10);
        assert_eq!((popup.x, popup.y, popup.width, popup.height), (20, 7, 40, 10));

        let small = Layout::popup(Rect::new(0, 0, 20, 5), 40, 10);
        assert_eq!((small.width, small.height), (20, 5));
    }
}
