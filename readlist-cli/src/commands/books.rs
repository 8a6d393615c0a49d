//! Book commands - add, list, edit, cycle, delete, stats
//!
//! Each command runs one store operation and prints the result.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use readlist_core::{
    BookDraft, BookId, BookQuery, BookStore, ReadlistError, Status, StatusFilter,
};
use serde_json::json;

/// Status values accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StatusArg {
    Planning,
    Reading,
    Done,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Planning => Status::Planning,
            StatusArg::Reading => Status::Reading,
            StatusArg::Done => Status::Done,
        }
    }
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Book title (required, cannot be blank)
    pub title: String,

    /// Author name
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// Initial status
    #[arg(long, short = 's', value_enum, default_value = "planning")]
    pub status: StatusArg,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show books with this status
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusArg>,

    /// Case-insensitive match on title or author
    #[arg(long, short = 'q')]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Book id
    pub id: BookId,

    /// New title
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// New author (pass an empty string to clear)
    #[arg(long, short = 'a')]
    pub author: Option<String>,

    /// New status
    #[arg(long, short = 's', value_enum)]
    pub status: Option<StatusArg>,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Book id
    pub id: BookId,
}

#[derive(Parser, Debug)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run_add(store: &BookStore, args: AddArgs) -> Result<()> {
    let draft = BookDraft::new(&args.title, args.author.as_deref())
        .map_err(ReadlistError::from)?
        .with_status(args.status.into());

    let id = store.insert(&draft).await.context("Failed to add book")?;
    println!("Added #{}: {} [{}]", id, draft.title(), draft.status());
    Ok(())
}

pub async fn run_list(store: &BookStore, args: ListArgs) -> Result<()> {
    let books = match args.status {
        Some(status) => store.list_by_status(status.into()).await,
        None => store.list_all().await,
    }
    .context("Failed to list books")?;
    let total = store.count().await.context("Failed to count books")?;

    // Status was applied by the store; only the search remains
    let query = BookQuery {
        search: args.search.unwrap_or_default(),
        filter: StatusFilter::All,
    };
    let visible = query.apply(&books);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    if visible.is_empty() {
        if total == 0 {
            println!("No books yet. Add one with: readlist add \"Title\"");
        } else {
            println!("No books match.");
        }
        return Ok(());
    }

    for book in &visible {
        let author = book
            .author
            .as_deref()
            .map(|a| format!(" by {}", a))
            .unwrap_or_default();
        println!("{:>4}  {:<8}  {}{}", book.id, book.status.as_str(), book.title, author);
    }
    println!("{} of {} books", visible.len(), total);
    Ok(())
}

pub async fn run_edit(store: &BookStore, args: EditArgs) -> Result<()> {
    let book = store
        .get(args.id)
        .await?
        .ok_or(ReadlistError::NotFound { id: args.id })?;

    let title = args.title.unwrap_or(book.title);
    let author = args.author.or(book.author);
    let status = args.status.map(Status::from).unwrap_or(book.status);

    let draft = BookDraft::new(&title, author.as_deref())
        .map_err(ReadlistError::from)?
        .with_status(status);

    store
        .update(args.id, &draft)
        .await
        .context("Failed to update book")?;
    println!("Updated #{}: {} [{}]", args.id, draft.title(), draft.status());
    Ok(())
}

pub async fn run_cycle(store: &BookStore, args: IdArgs) -> Result<()> {
    let book = store
        .get(args.id)
        .await?
        .ok_or(ReadlistError::NotFound { id: args.id })?;

    let draft = book.cycled();
    store
        .update(book.id, &draft)
        .await
        .context("Failed to update status")?;

    tracing::info!(id = book.id, from = %book.status, to = %draft.status(), "Changed status");
    println!("#{} {}: {} -> {}", book.id, book.title, book.status, draft.status());
    Ok(())
}

pub async fn run_delete(store: &BookStore, args: IdArgs) -> Result<()> {
    store
        .delete(args.id)
        .await
        .with_context(|| format!("Failed to delete book #{}", args.id))?;
    println!("Deleted #{}", args.id);
    Ok(())
}

pub async fn run_stats(store: &BookStore, args: StatsArgs) -> Result<()> {
    let counts = store
        .count_by_status()
        .await
        .context("Failed to count books")?;

    if args.json {
        let output = json!({
            "planning": counts.planning,
            "reading": counts.reading,
            "done": counts.done,
            "total": counts.total(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for status in Status::ALL {
            println!("{:<8} {}", status.as_str(), counts.get(status));
        }
        println!("{:<8} {}", "total", counts.total());
    }
    Ok(())
}
