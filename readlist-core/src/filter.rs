//! Client-side search and status filtering for the list screen.
//!
//! Search and filter combine with logical AND. `FilteredList` caches the
//! visible rows and recomputes them only when the books or the query change.

use crate::model::{Book, Status};

/// Which statuses the list shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// Cycle All -> Planning -> Reading -> Done -> All
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Only(Status::Planning),
            StatusFilter::Only(Status::Planning) => StatusFilter::Only(Status::Reading),
            StatusFilter::Only(Status::Reading) => StatusFilter::Only(Status::Done),
            StatusFilter::Only(Status::Done) => StatusFilter::All,
        }
    }

    pub fn matches(self, book: &Book) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => book.status == status,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

impl From<Option<Status>> for StatusFilter {
    fn from(status: Option<Status>) -> Self {
        status.map_or(StatusFilter::All, StatusFilter::Only)
    }
}

/// Case-insensitive substring match on title or author.
/// A blank query matches every book.
pub fn matches_search(book: &Book, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    book.title.to_lowercase().contains(&needle)
        || book
            .author
            .as_deref()
            .is_some_and(|a| a.to_lowercase().contains(&needle))
}

/// Search text plus status filter
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub search: String,
    pub filter: StatusFilter,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        self.filter.matches(book) && matches_search(book, &self.search)
    }

    /// Books matching the query, preserving input order
    pub fn apply<'a>(&self, books: &'a [Book]) -> Vec<&'a Book> {
        books.iter().filter(|b| self.matches(b)).collect()
    }
}

/// Book list with a memoized filtered view
#[derive(Debug, Default)]
pub struct FilteredList {
    books: Vec<Book>,
    query: BookQuery,
    visible: Option<Vec<usize>>,
}

impl FilteredList {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books,
            ..Self::default()
        }
    }

    /// Replace the whole list (after a reload)
    pub fn set_books(&mut self, books: Vec<Book>) {
        self.books = books;
        self.visible = None;
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn query(&self) -> &BookQuery {
        &self.query
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search != self.query.search {
            self.query.search = search;
            self.visible = None;
        }
    }

    pub fn push_search_char(&mut self, c: char) {
        self.query.search.push(c);
        self.visible = None;
    }

    pub fn pop_search_char(&mut self) {
        if self.query.search.pop().is_some() {
            self.visible = None;
        }
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        if filter != self.query.filter {
            self.query.filter = filter;
            self.visible = None;
        }
    }

    /// Whether the visible rows must be recomputed on next access
    pub fn is_stale(&self) -> bool {
        self.visible.is_none()
    }

    /// Indices into `books()` of the rows that pass the query
    pub fn visible_indices(&mut self) -> &[usize] {
        if self.visible.is_none() {
            let indices = self
                .books
                .iter()
                .enumerate()
                .filter(|(_, b)| self.query.matches(b))
                .map(|(i, _)| i)
                .collect();
            self.visible = Some(indices);
        }
        self.visible.as_deref().unwrap_or_default()
    }

    pub fn visible(&mut self) -> Vec<&Book> {
        self.visible_indices();
        let indices = self.visible.as_deref().unwrap_or_default();
        indices.iter().map(|&i| &self.books[i]).collect()
    }

    pub fn visible_len(&mut self) -> usize {
        self.visible_indices().len()
    }

    /// The `n`th visible book
    pub fn visible_at(&mut self, n: usize) -> Option<&Book> {
        let idx = *self.visible_indices().get(n)?;
        self.books.get(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn book(id: i64, title: &str, author: Option<&str>, status: Status) -> Book {
        Book {
            id,
            title: title.into(),
            author: author.map(Into::into),
            status,
            created_at: 1_700_000_000_000 - id,
        }
    }

    fn shelf() -> Vec<Book> {
        vec![
            book(1, "Dune", Some("Frank Herbert"), Status::Reading),
            book(2, "The Hobbit", Some("J.R.R. Tolkien"), Status::Done),
            book(3, "Children of Dune", Some("Frank Herbert"), Status::Planning),
            book(4, "Notebook", None, Status::Planning),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let b = book(1, "Dune", Some("Frank Herbert"), Status::Reading);
        assert!(matches_search(&b, "dUnE"));
        assert!(matches_search(&b, "HERB"));
        assert!(matches_search(&b, "  une "));
        assert!(!matches_search(&b, "tolkien"));
    }

    #[test]
    fn test_search_without_author() {
        let b = book(4, "Notebook", None, Status::Planning);
        assert!(matches_search(&b, "note"));
        assert!(!matches_search(&b, "herbert"));
    }

    #[test]
    fn test_blank_search_matches_all() {
        let books = shelf();
        let q = BookQuery {
            search: "   ".into(),
            filter: StatusFilter::All,
        };
        assert_eq!(q.apply(&books).len(), books.len());
    }

    #[test]
    fn test_search_and_filter_combine_with_and() {
        let books = shelf();
        let q = BookQuery {
            search: "dune".into(),
            filter: StatusFilter::Only(Status::Planning),
        };
        let ids: Vec<i64> = q.apply(&books).iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_filter_cycle() {
        let mut f = StatusFilter::All;
        let mut seen = vec![f];
        for _ in 0..4 {
            f = f.next();
            seen.push(f);
        }
        assert_eq!(
            seen,
            vec![
                StatusFilter::All,
                StatusFilter::Only(Status::Planning),
                StatusFilter::Only(Status::Reading),
                StatusFilter::Only(Status::Done),
                StatusFilter::All,
            ]
        );
    }

    #[test]
    fn test_filtered_list_recomputes_only_on_change() {
        let mut list = FilteredList::new(shelf());
        assert!(list.is_stale());
        assert_eq!(list.visible_len(), 4);
        assert!(!list.is_stale());

        // Same values do not invalidate
        list.set_search("");
        list.set_filter(StatusFilter::All);
        assert!(!list.is_stale());

        list.set_filter(StatusFilter::Only(Status::Planning));
        assert!(list.is_stale());
        assert_eq!(list.visible_len(), 2);

        list.push_search_char('n');
        list.push_search_char('o');
        assert_eq!(list.visible_at(0).map(|b| b.id), Some(4));
        assert_eq!(list.visible_len(), 1);

        list.set_books(Vec::new());
        assert!(list.is_stale());
        assert_eq!(list.visible_len(), 0);
        assert!(list.visible_at(0).is_none());
    }

    #[test]
    fn test_pop_on_empty_search_keeps_cache() {
        let mut list = FilteredList::new(shelf());
        list.visible_len();
        list.pop_search_char();
        assert!(!list.is_stale());
    }

    proptest! {
        #[test]
        fn prop_search_ignores_case(title in "[a-zA-Z ]{1,24}", start in 0usize..24, len in 1usize..8) {
            let b = book(1, &title, None, Status::Planning);
            let chars: Vec<char> = title.chars().collect();
            let start = start.min(chars.len() - 1);
            let end = (start + len).min(chars.len());
            let needle: String = chars[start..end].iter().collect();
            prop_assert!(matches_search(&b, &needle.to_uppercase()));
            prop_assert!(matches_search(&b, &needle.to_lowercase()));
        }

        #[test]
        fn prop_filtered_is_subset(search in "[a-z]{0,3}") {
            let books = shelf();
            for filter in [StatusFilter::All, StatusFilter::Only(Status::Planning), StatusFilter::Only(Status::Done)] {
                let q = BookQuery { search: search.clone(), filter };
                let out = q.apply(&books);
                prop_assert!(out.len() <= books.len());
                prop_assert!(out.iter().all(|b| filter.matches(b) && matches_search(b, &search)));
            }
        }
    }
}
