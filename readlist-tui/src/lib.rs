//! readlist-tui: the reading-list screen.
//!
//! Renders the books from the store, applies search and status filters,
//! and issues add/edit/cycle/delete mutations.

pub mod app;
pub mod mode;
pub mod terminal;
pub mod ui;

// Re-export commonly used types
pub use app::{App, BookForm, Notice};
pub use mode::{AppMode, FormField};
pub use terminal::run;
pub use ui::UI;
