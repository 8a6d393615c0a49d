//! readlist-core: book model, search filtering and the SQLite persistence shim.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod store;
pub mod validation;

pub use config::ReadlistConfig;
pub use error::{ReadlistError, Result};
pub use filter::{matches_search, BookQuery, FilteredList, StatusFilter};
pub use model::{
    Book, BookDraft, BookId, Status, StatusCounts, MAX_AUTHOR_LEN, MAX_TITLE_LEN,
};
pub use store::BookStore;
pub use validation::ValidationError;
