//! Table-view records for front-ends.
//!
//! A list view shows a fixed set of columns per entity. These types name those columns
//! instead of passing loosely shaped maps around.

use crate::model::{format_date, Book, Diary};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the shortened id column.
pub const SHORT_ID_LEN: usize = 8;
/// Display width of a diary content preview.
pub const PREVIEW_WIDTH: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRow {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            short_id: short_id(&book.id),
            title: book.title.clone(),
            author: book.author.clone(),
            published_year: book.published_year,
            genre: book.genre.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryRow {
    pub id: String,
    pub short_id: String,
    pub date: String,
    pub preview: String,
}

impl From<&Diary> for DiaryRow {
    fn from(diary: &Diary) -> Self {
        Self {
            id: diary.id.clone(),
            short_id: short_id(&diary.id),
            date: format_date(diary.date),
            preview: preview(&diary.content, PREVIEW_WIDTH),
        }
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

/// Single-line preview no wider than `max_width` columns, ending in `…` when cut.
pub fn preview(content: &str, max_width: usize) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if flat.width() <= max_width {
        return flat;
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in flat.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
