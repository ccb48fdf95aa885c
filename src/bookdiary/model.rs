//! # Entity Model
//!
//! Two record types live here: [`Book`] and [`Diary`]. Both are plain values with an
//! opaque string identity. They never validate their own fields; required-field checks
//! belong to the callers (see [`crate::validation`]).
//!
//! ## Serialization Shape
//!
//! Entities are not serialized directly. Each one converts to and from a record type
//! ([`BookRecord`], [`DiaryRecord`]) that pins down the on-disk shape:
//!
//! ```text
//! Book:  {"id", "title", "author", "publishedYear", "genre", "memo"}
//! Diary: {"id", "bookId", "date": "YYYY-MM-DD", "content"}
//! ```
//!
//! `to_record` and `from_record` are inverses. The only fallible direction is
//! `Diary::from_record`, which rejects any date not written in the fixed calendar format.

use crate::error::{BookDiaryError, Result};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Calendar format used for diary dates everywhere: on disk, in the CLI, in rows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parses a `YYYY-MM-DD` string. Anything that does not format back to the exact
/// same text (unpadded months, trailing time, whitespace) is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| BookDiaryError::InvalidDate(input.to_string()))?;
    if format_date(date) != input {
        return Err(BookDiaryError::InvalidDate(input.to_string()));
    }
    Ok(date)
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
    pub memo: String,
}

impl Book {
    pub fn new(title: impl Into<String>, author: impl Into<String>, published_year: i32) -> Self {
        Self::with_id(new_id(), title, author, published_year)
    }

    /// Rebuilds a book with a known id, e.g. when replacing an existing record.
    pub fn with_id(
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        published_year: i32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            published_year,
            genre: String::new(),
            memo: String::new(),
        }
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            author: self.author.clone(),
            published_year: self.published_year,
            genre: self.genre.clone(),
            memo: self.memo.clone(),
        }
    }

    pub fn from_record(record: BookRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            published_year: record.published_year,
            genre: record.genre,
            memo: record.memo,
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.published_year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diary {
    pub id: String,
    pub book_id: String,
    pub date: NaiveDate,
    pub content: String,
}

impl Diary {
    /// A new entry dated today (local calendar).
    pub fn new(book_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            book_id: book_id.into(),
            date: Local::now().date_naive(),
            content: content.into(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn to_record(&self) -> DiaryRecord {
        DiaryRecord {
            id: self.id.clone(),
            book_id: self.book_id.clone(),
            date: format_date(self.date),
            content: self.content.clone(),
        }
    }

    pub fn from_record(record: DiaryRecord) -> Result<Self> {
        let date = parse_date(&record.date)?;
        Ok(Self {
            id: record.id,
            book_id: record.book_id,
            date,
            content: record.content,
        })
    }
}

impl fmt::Display for Diary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview: String = self.content.chars().take(30).collect();
        write!(f, "{}: {}...", format_date(self.date), preview)
    }
}

/// On-disk shape of a [`Book`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    // Older data files were written with snake_case keys
    #[serde(alias = "published_year")]
    pub published_year: i32,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub memo: String,
}

/// On-disk shape of a [`Diary`]. The date stays a string here so a malformed
/// value surfaces as `InvalidDate` rather than a generic decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryRecord {
    pub id: String,
    #[serde(alias = "book_id")]
    pub book_id: String,
    pub date: String,
    pub content: String,
}
