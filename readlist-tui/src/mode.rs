/// Screen modes (vim-inspired)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppMode {
    /// Navigate the list
    Normal,

    /// Typing into the search box
    Search,

    /// Add-book form
    AddForm,

    /// Edit-book form
    EditForm,

    /// Waiting for y/n before deleting
    ConfirmDelete,
}

impl AppMode {
    /// Get display name for status bar
    pub fn display_name(&self) -> &'static str {
        match self {
            AppMode::Normal => "NORMAL",
            AppMode::Search => "SEARCH",
            AppMode::AddForm => "ADD",
            AppMode::EditForm => "EDIT",
            AppMode::ConfirmDelete => "DELETE?",
        }
    }

    /// Get color for status bar
    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            AppMode::Normal => Color::Cyan,
            AppMode::Search => Color::Yellow,
            AppMode::AddForm => Color::Green,
            AppMode::EditForm => Color::Magenta,
            AppMode::ConfirmDelete => Color::Red,
        }
    }

    /// Whether a form popup is open
    pub fn is_form(&self) -> bool {
        matches!(self, AppMode::AddForm | AppMode::EditForm)
    }
}

/// Which form field has focus
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Title,
    Author,
    Status,
}

impl FormField {
    /// Move to the next field. The add form has no status picker.
    pub fn next(&self, with_status: bool) -> Self {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author if with_status => FormField::Status,
            FormField::Author | FormField::Status => FormField::Title,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::Title.next(true), FormField::Author);
        assert_eq!(FormField::Author.next(true), FormField::Status);
        assert_eq!(FormField::Status.next(true), FormField::Title);
        assert_eq!(FormField::Author.next(false), FormField::Title);
    }

    #[test]
    fn test_only_forms_are_forms() {
        assert!(AppMode::AddForm.is_form());
        assert!(AppMode::EditForm.is_form());
        assert!(!AppMode::Search.is_form());
        assert!(!AppMode::Normal.is_form());
    }
}
