use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use readlist_core::{
    Book, BookDraft, BookId, BookStore, FilteredList, ReadlistError, Status, StatusCounts,
    StatusFilter, MAX_AUTHOR_LEN, MAX_TITLE_LEN,
};
use std::time::Duration;
use tracing::{error, info};

use crate::mode::{AppMode, FormField};

/// Shown whenever a store operation fails. Details go to the log.
pub const GENERIC_FAILURE: &str = "Operation failed. Please try again.";

/// Message for the command bar
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(s) | Notice::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Add/edit form state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub status: Status,
    pub field: FormField,
    /// Book being edited; `None` for the add form
    pub editing: Option<BookId>,
}

impl BookForm {
    fn empty() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            status: Status::default(),
            field: FormField::Title,
            editing: None,
        }
    }

    fn for_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone().unwrap_or_default(),
            status: book.status,
            field: FormField::Title,
            editing: Some(book.id),
        }
    }

    /// Text buffer of the focused field and its length cap, if it is a text field
    fn focused_text(&mut self) -> Option<(&mut String, usize)> {
        match self.field {
            FormField::Title => Some((&mut self.title, MAX_TITLE_LEN)),
            FormField::Author => Some((&mut self.author, MAX_AUTHOR_LEN)),
            FormField::Status => None,
        }
    }

    fn draft(&self) -> Result<BookDraft, readlist_core::ValidationError> {
        Ok(BookDraft::new(&self.title, Some(&self.author))?.with_status(self.status))
    }
}

impl Default for BookForm {
    fn default() -> Self {
        Self::empty()
    }
}

/// Main application state
pub struct App {
    /// Current mode
    pub mode: AppMode,

    /// All books plus the memoized search/filter view
    pub list: FilteredList,

    /// Selected row within the visible list
    pub selected: usize,

    /// Per-status counts for the status bar
    pub counts: StatusCounts,

    /// Add/edit form
    pub form: BookForm,

    /// Message shown in the command bar
    pub notice: Option<Notice>,

    /// Should quit?
    pub should_quit: bool,

    /// Book store
    pub store: BookStore,
}

impl App {
    /// Create a new App
    pub fn new(store: BookStore) -> Self {
        Self {
            mode: AppMode::Normal,
            list: FilteredList::default(),
            selected: 0,
            counts: StatusCounts::default(),
            form: BookForm::empty(),
            notice: None,
            should_quit: false,
            store,
        }
    }

    /// Reload books and counts from the store.
    /// Returns false (after notifying) when the store failed.
    pub async fn load_books(&mut self) -> bool {
        let loaded = match self.store.list_all().await {
            Ok(books) => self.store.count_by_status().await.map(|c| (books, c)),
            Err(e) => Err(e),
        };

        match loaded {
            Ok((books, counts)) => {
                self.list.set_books(books);
                self.counts = counts;
                self.clamp_selection();
                true
            }
            Err(e) => {
                self.report_failure("load books", e);
                false
            }
        }
    }

    /// Currently selected book
    pub fn selected_book(&mut self) -> Option<Book> {
        self.list.visible_at(self.selected).cloned()
    }

    /// Handle keyboard input
    pub async fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            AppMode::Normal => self.handle_normal_mode(key).await,
            AppMode::Search => self.handle_search_mode(key),
            AppMode::AddForm | AppMode::EditForm => self.handle_form_mode(key).await,
            AppMode::ConfirmDelete => self.handle_confirm_delete(key).await,
        }
    }

    /// Handle normal mode keys
    async fn handle_normal_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }

            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous(),
            KeyCode::Home | KeyCode::Char('g') => self.selected = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.selected = self.list.visible_len().saturating_sub(1);
            }

            // Tap on a row
            KeyCode::Enter | KeyCode::Char(' ') => self.cycle_selected().await,

            KeyCode::Char('a') => {
                self.form = BookForm::empty();
                self.mode = AppMode::AddForm;
                self.notice = None;
            }

            KeyCode::Char('e') => {
                if let Some(book) = self.selected_book() {
                    self.form = BookForm::for_book(&book);
                    self.mode = AppMode::EditForm;
                    self.notice = None;
                }
            }

            KeyCode::Char('d') => {
                if let Some(book) = self.selected_book() {
                    self.mode = AppMode::ConfirmDelete;
                    self.notice = Some(Notice::Info(format!(
                        "Delete \"{}\"? (y/n)",
                        book.title
                    )));
                }
            }

            KeyCode::Char('/') => {
                self.mode = AppMode::Search;
                self.notice = None;
            }

            KeyCode::Esc => {
                self.list.set_search("");
                self.clamp_selection();
                self.notice = None;
            }

            KeyCode::Char('f') => {
                let next = self.list.query().filter.next();
                self.set_filter(next);
            }
            KeyCode::Char('0') => self.set_filter(StatusFilter::All),
            KeyCode::Char('1') => self.set_filter(StatusFilter::Only(Status::Planning)),
            KeyCode::Char('2') => self.set_filter(StatusFilter::Only(Status::Reading)),
            KeyCode::Char('3') => self.set_filter(StatusFilter::Only(Status::Done)),

            KeyCode::Char('r') => {
                if self.load_books().await {
                    self.notice = Some(Notice::Info("Refreshed".to_string()));
                }
            }

            _ => {}
        }
    }

    /// Handle search box keys
    fn handle_search_mode(&mut self, key: KeyEvent) {
        match key.code {
            // Keep the query, back to the list
            KeyCode::Enter | KeyCode::Down => {
                self.mode = AppMode::Normal;
            }

            // Clear the query
            KeyCode::Esc => {
                self.list.set_search("");
                self.mode = AppMode::Normal;
            }

            KeyCode::Backspace => {
                self.list.pop_search_char();
            }

            KeyCode::Char(c) => {
                self.list.push_search_char(c);
            }

            _ => {}
        }
        self.selected = 0;
    }

    /// Handle add/edit form keys
    async fn handle_form_mode(&mut self, key: KeyEvent) {
        let with_status = self.mode == AppMode::EditForm;

        match key.code {
            KeyCode::Esc => {
                self.mode = AppMode::Normal;
                self.notice = None;
            }

            KeyCode::Enter => self.save_form().await,

            KeyCode::Tab | KeyCode::Down => {
                self.form.field = self.form.field.next(with_status);
            }

            KeyCode::Left if self.form.field == FormField::Status => {
                self.form.status = self.form.status.prev();
            }
            KeyCode::Right | KeyCode::Char(' ') if self.form.field == FormField::Status => {
                self.form.status = self.form.status.next();
            }

            KeyCode::Backspace => {
                if let Some((text, _)) = self.form.focused_text() {
                    text.pop();
                }
            }

            KeyCode::Char(_)
                if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}

            KeyCode::Char(c) => {
                // Input stops at the cap
                if let Some((text, max)) = self.form.focused_text() {
                    if text.chars().count() < max {
                        text.push(c);
                    }
                }
            }

            _ => {}
        }
    }

    /// Handle y/n after `d`
    async fn handle_confirm_delete(&mut self, key: KeyEvent) {
        self.mode = AppMode::Normal;

        if !matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.notice = Some(Notice::Info("Delete cancelled".to_string()));
            return;
        }

        let Some(book) = self.selected_book() else {
            self.notice = None;
            return;
        };

        match self.store.delete(book.id).await {
            Ok(()) => {
                info!(id = book.id, title = %book.title, "Deleted book");
                self.notice = Some(Notice::Info("Book removed from the list".to_string()));
                self.load_books().await;
            }
            Err(e) => self.report_failure("delete book", e),
        }
    }

    /// Validate the form, then insert or update
    async fn save_form(&mut self) {
        let draft = match self.form.draft() {
            Ok(d) => d,
            Err(e) => {
                // Rejected before reaching storage
                self.notice = Some(Notice::Error(format!("Please fix the form: {}", e)));
                return;
            }
        };

        let result = match self.form.editing {
            Some(id) => self.store.update(id, &draft).await.map(|_| id),
            None => self.store.insert(&draft).await,
        };

        match result {
            Ok(id) => {
                let msg = if self.form.editing.is_some() {
                    info!(id, title = draft.title(), "Edited book");
                    "Book updated"
                } else {
                    info!(id, title = draft.title(), "Added book");
                    "Book added to the list"
                };
                self.mode = AppMode::Normal;
                self.form = BookForm::empty();
                self.notice = Some(Notice::Info(msg.to_string()));
                self.load_books().await;
            }
            Err(e) => {
                let action = if self.form.editing.is_some() {
                    "update book"
                } else {
                    "add book"
                };
                self.report_failure(action, e);
            }
        }
    }

    /// Advance the selected book's status one step
    async fn cycle_selected(&mut self) {
        let Some(book) = self.selected_book() else {
            return;
        };

        let draft = book.cycled();
        match self.store.update(book.id, &draft).await {
            Ok(()) => {
                info!(
                    id = book.id,
                    title = %book.title,
                    from = %book.status,
                    to = %draft.status(),
                    "Changed status"
                );
                self.notice = Some(Notice::Info(format!(
                    "\"{}\": {} -> {}",
                    book.title,
                    book.status.label(),
                    draft.status().label()
                )));
                self.load_books().await;
            }
            Err(e) => self.report_failure("update status", e),
        }
    }

    fn set_filter(&mut self, filter: StatusFilter) {
        self.list.set_filter(filter);
        self.selected = 0;
        self.notice = Some(Notice::Info(format!("Showing: {}", filter.label())));
    }

    /// Log the error and show the generic failure notice
    fn report_failure(&mut self, action: &str, err: ReadlistError) {
        error!(action, error = %err, "Store operation failed");
        self.notice = Some(Notice::Error(GENERIC_FAILURE.to_string()));
    }

    fn clamp_selection(&mut self) {
        let len = self.list.visible_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// Move selection up
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if self.selected < self.list.visible_len().saturating_sub(1) {
            self.selected += 1;
        }
    }

    /// Poll for events with timeout
    pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}
