use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{ReadlistError, Result};
use crate::model::{Book, BookDraft, BookId, Status, StatusCounts};

/// SQLite-backed book storage.
///
/// Owns the single local connection. Every statement goes through a pool
/// capped at one connection, so statements from concurrently fired actions
/// are serialized by the store.
#[derive(Clone, Debug)]
pub struct BookStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl BookStore {
    /// Open (creating if missing) the database at `db_path` and initialize the schema
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self {
            pool,
            path: db_path.to_path_buf(),
        };
        store.initialize().await?;

        debug!(path = %db_path.display(), "Book store opened");
        Ok(store)
    }

    /// Database file backing this store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the books table if absent. Safe to call repeatedly.
    pub async fn initialize(&self) -> Result<()> {
        let schema = include_str!("schema.sql");
        sqlx::raw_sql(schema).execute(&self.pool).await?;
        debug!("Schema initialized");
        Ok(())
    }

    /// All books, newest first
    pub async fn list_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            "SELECT id, title, author, status, created_at FROM books \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed books");
        rows.iter().map(Self::book_from_row).collect()
    }

    /// Books with one status, newest first
    pub async fn list_by_status(&self, status: Status) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            "SELECT id, title, author, status, created_at FROM books \
             WHERE status = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        debug!(%status, count = rows.len(), "Listed books by status");
        rows.iter().map(Self::book_from_row).collect()
    }

    /// Get a book by id
    pub async fn get(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            "SELECT id, title, author, status, created_at FROM books WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        debug!(id, found = row.is_some(), "Fetched book");
        row.as_ref().map(Self::book_from_row).transpose()
    }

    /// Insert a book, stamping `created_at` with the current time.
    /// Returns the generated id.
    pub async fn insert(&self, draft: &BookDraft) -> Result<BookId> {
        let created_at = chrono::Utc::now().timestamp_millis();

        let result = sqlx::query(
            "INSERT INTO books (title, author, status, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(draft.title())
        .bind(draft.author())
        .bind(draft.status().as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id, title = draft.title(), status = %draft.status(), "Inserted book");
        Ok(id)
    }

    /// Overwrite title, author and status. `created_at` is left untouched.
    pub async fn update(&self, id: BookId, draft: &BookDraft) -> Result<()> {
        let result = sqlx::query("UPDATE books SET title = ?, author = ?, status = ? WHERE id = ?")
            .bind(draft.title())
            .bind(draft.author())
            .bind(draft.status().as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ReadlistError::NotFound { id });
        }

        debug!(id, status = %draft.status(), "Updated book");
        Ok(())
    }

    /// Delete a book by id
    pub async fn delete(&self, id: BookId) -> Result<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ReadlistError::NotFound { id });
        }

        debug!(id, "Deleted book");
        Ok(())
    }

    /// Number of books per status
    pub async fn count_by_status(&self) -> Result<StatusCounts> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS count FROM books GROUP BY status")
            .fetch_all(&self.pool)
            .await?;

        let mut counts = StatusCounts::default();
        for row in &rows {
            let status = Self::status_from_row(row)?;
            counts.set(status, row.try_get("count")?);
        }
        debug!(total = counts.total(), "Counted books by status");
        Ok(counts)
    }

    /// Count total books
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM books")
            .fetch_one(&self.pool)
            .await?;
        let count: i64 = row.try_get("count")?;
        debug!(count, "Counted books");
        Ok(count)
    }

    fn status_from_row(row: &SqliteRow) -> Result<Status> {
        let raw: String = row.try_get("status")?;
        raw.parse()
            .map_err(|_| ReadlistError::invalid_data("books.status", format!("unknown status '{}'", raw)))
    }

    fn book_from_row(row: &SqliteRow) -> Result<Book> {
        Ok(Book {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            status: Self::status_from_row(row)?,
            created_at: row.try_get("created_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn temp_store() -> (tempfile::TempDir, BookStore) {
        let dir = tempdir().unwrap();
        let store = BookStore::open(dir.path().join("test.db")).await.unwrap();
        (dir, store)
    }

    fn draft(title: &str, author: Option<&str>) -> BookDraft {
        BookDraft::new(title, author).unwrap()
    }

    #[tokio::test]
    async fn test_create_store() {
        let (_dir, store) = temp_store().await;
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("books.db");
        let store = BookStore::open(&path).await.unwrap();
        assert!(path.exists());
        assert_eq!(store.path(), path.as_path());
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let (dir, store) = temp_store().await;
        store.insert(&draft("Dune", None)).await.unwrap();

        store.initialize().await.unwrap();
        store.initialize().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        // Reopening the same file keeps the rows
        drop(store);
        let reopened = BookStore::open(dir.path().join("test.db")).await.unwrap();
        assert_eq!(reopened.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (_dir, store) = temp_store().await;

        let id = store
            .insert(&draft("Dune", Some("Frank Herbert")))
            .await
            .unwrap();

        let books = store.list_all().await.unwrap();
        assert_eq!(books.len(), 1);
        let book = &books[0];
        assert_eq!(book.id, id);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(book.status, Status::Planning);
        assert!(book.created_at > 0);
    }

    #[tokio::test]
    async fn test_insert_without_author_stores_null() {
        let (_dir, store) = temp_store().await;
        let id = store.insert(&draft("Untitled notes", Some(""))).await.unwrap();
        let book = store.get(id).await.unwrap().unwrap();
        assert_eq!(book.author, None);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (_dir, store) = temp_store().await;
        let first = store.insert(&draft("First", None)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.insert(&draft("Second", None)).await.unwrap();
        let third = store.insert(&draft("Third", None)).await.unwrap();

        let ids: Vec<BookId> = store.list_all().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let (_dir, store) = temp_store().await;
        let id = store.insert(&draft("Dune", None)).await.unwrap();
        let before = store.get(id).await.unwrap().unwrap();

        let edited = draft("Dune Messiah", Some("Frank Herbert")).with_status(Status::Reading);
        store.update(id, &edited).await.unwrap();

        let after = store.get(id).await.unwrap().unwrap();
        assert_eq!(after.title, "Dune Messiah");
        assert_eq!(after.author.as_deref(), Some("Frank Herbert"));
        assert_eq!(after.status, Status::Reading);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_dir, store) = temp_store().await;
        let err = store.update(99, &draft("Ghost", None)).await.unwrap_err();
        assert!(matches!(err, ReadlistError::NotFound { id: 99 }));
    }

    #[tokio::test]
    async fn test_delete_removes_and_never_reuses_id() {
        let (_dir, store) = temp_store().await;
        let a = store.insert(&draft("A", None)).await.unwrap();
        let b = store.insert(&draft("B", None)).await.unwrap();

        store.delete(b).await.unwrap();
        let ids: Vec<BookId> = store.list_all().await.unwrap().iter().map(|x| x.id).collect();
        assert_eq!(ids, vec![a]);
        assert!(store.get(b).await.unwrap().is_none());

        let c = store.insert(&draft("C", None)).await.unwrap();
        assert!(c > b);

        let err = store.delete(b).await.unwrap_err();
        assert!(matches!(err, ReadlistError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_count_by_status_sums_to_total() {
        let (_dir, store) = temp_store().await;
        store.insert(&draft("A", None)).await.unwrap();
        store
            .insert(&draft("B", None).with_status(Status::Reading))
            .await
            .unwrap();
        store
            .insert(&draft("C", None).with_status(Status::Done))
            .await
            .unwrap();
        store
            .insert(&draft("D", None).with_status(Status::Done))
            .await
            .unwrap();

        let counts = store.count_by_status().await.unwrap();
        assert_eq!(counts.planning, 1);
        assert_eq!(counts.reading, 1);
        assert_eq!(counts.done, 2);
        assert_eq!(counts.total(), store.count().await.unwrap());
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let (_dir, store) = temp_store().await;
        store.insert(&draft("A", None)).await.unwrap();
        let b = store
            .insert(&draft("B", None).with_status(Status::Reading))
            .await
            .unwrap();

        let reading = store.list_by_status(Status::Reading).await.unwrap();
        assert_eq!(reading.len(), 1);
        assert_eq!(reading[0].id, b);
        assert!(store.list_by_status(Status::Done).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cycle_through_store() {
        let (_dir, store) = temp_store().await;
        let id = store.insert(&draft("Dune", None)).await.unwrap();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let book = store.get(id).await.unwrap().unwrap();
            store.update(id, &book.cycled()).await.unwrap();
            seen.push(store.get(id).await.unwrap().unwrap().status);
        }
        assert_eq!(seen, vec![Status::Reading, Status::Done, Status::Planning]);
    }

    #[tokio::test]
    async fn test_unknown_status_is_invalid_data() {
        let (_dir, store) = temp_store().await;
        // Bypass the CHECK constraint to simulate a foreign writer
        sqlx::raw_sql(
            "PRAGMA ignore_check_constraints = ON; \
             INSERT INTO books (title, status, created_at) VALUES ('Odd', 'paused', 1);",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, ReadlistError::InvalidData { .. }));
    }
}
