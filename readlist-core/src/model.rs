use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::validation::ValidationError;

/// Maximum title length (in characters)
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum author name length (in characters)
pub const MAX_AUTHOR_LEN: usize = 100;

/// Store-generated book identifier
pub type BookId = i64;

/// Reading status of a book
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Planning,
    Reading,
    Done,
}

impl Status {
    /// All statuses in cycle order
    pub const ALL: [Status; 3] = [Status::Planning, Status::Reading, Status::Done];

    /// Next status when the row is tapped: planning -> reading -> done -> planning
    pub fn next(self) -> Self {
        match self {
            Status::Planning => Status::Reading,
            Status::Reading => Status::Done,
            Status::Done => Status::Planning,
        }
    }

    /// Previous status (reverse of `next`), used by the edit form picker
    pub fn prev(self) -> Self {
        match self {
            Status::Planning => Status::Done,
            Status::Reading => Status::Planning,
            Status::Done => Status::Reading,
        }
    }

    /// Value persisted in the `status` column
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Planning => "planning",
            Status::Reading => "reading",
            Status::Done => "done",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Status::Planning => "Plan to read",
            Status::Reading => "Reading",
            Status::Done => "Finished",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "planning" => Ok(Status::Planning),
            "reading" => Ok(Status::Reading),
            "done" => Ok(Status::Done),
            _ => Err(ValidationError::InvalidVariant {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// A single reading-list entry as stored
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: Option<String>,
    pub status: Status,
    /// Milliseconds since the Unix epoch, set at insert
    pub created_at: i64,
}

impl Book {
    /// Insert time as a UTC datetime
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_at)
    }

    /// Draft that keeps title and author and advances the status one step
    pub fn cycled(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            status: self.status.next(),
        }
    }
}

/// Validated title/author/status, ready for insert or update.
///
/// The only constructor trims and checks the fields, so an empty title
/// never reaches storage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookDraft {
    title: String,
    author: Option<String>,
    status: Status,
}

impl BookDraft {
    /// Validate a new draft with the default status (planning).
    ///
    /// # Rules
    /// - title is trimmed and must not be empty
    /// - a blank author becomes `None`
    /// - title is limited to 200 characters, author to 100
    pub fn new(title: &str, author: Option<&str>) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        let author = author.map(str::trim).filter(|a| !a.is_empty());
        if let Some(a) = author {
            if a.chars().count() > MAX_AUTHOR_LEN {
                return Err(ValidationError::TooLong {
                    field: "author",
                    max: MAX_AUTHOR_LEN,
                });
            }
        }

        Ok(Self {
            title: title.to_owned(),
            author: author.map(str::to_owned),
            status: Status::default(),
        })
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Number of books per status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub planning: i64,
    pub reading: i64,
    pub done: i64,
}

impl StatusCounts {
    pub fn get(&self, status: Status) -> i64 {
        match status {
            Status::Planning => self.planning,
            Status::Reading => self.reading,
            Status::Done => self.done,
        }
    }

    pub fn set(&mut self, status: Status, count: i64) {
        match status {
            Status::Planning => self.planning = count,
            Status::Reading => self.reading = count,
            Status::Done => self.done = count,
        }
    }

    pub fn total(&self) -> i64 {
        self.planning + self.reading + self.done
    }
}
