use bookdiary::model::{format_date, Book, Diary};
use bookdiary::rows::{BookRow, DiaryRow};
use chrono::{Local, NaiveDate};
use colored::Colorize;
use std::time::Duration;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const TITLE_WIDTH: usize = 36;
const AUTHOR_WIDTH: usize = 24;
const AGE_WIDTH: usize = 14;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    for row in books.iter().map(BookRow::from) {
        let genre = if row.genre.is_empty() {
            String::new()
        } else {
            format!("  [{}]", row.genre)
        };
        println!(
            "{}  {}  {}  {}{}",
            row.short_id.yellow(),
            pad_to_width(&row.title, TITLE_WIDTH).bold(),
            pad_to_width(&row.author, AUTHOR_WIDTH),
            row.published_year,
            genre.dimmed()
        );
    }
}

pub(super) fn print_book(book: &Book, diary_count: usize) {
    println!("{} {}", book.title.bold(), format!("({})", book.id).dimmed());
    println!("--------------------------------");
    println!("Author:    {}", book.author);
    println!("Published: {}", book.published_year);
    if !book.genre.is_empty() {
        println!("Genre:     {}", book.genre);
    }
    println!("Entries:   {}", diary_count);
    if !book.memo.is_empty() {
        println!();
        println!("{}", book.memo);
    }
}

pub(super) fn print_diaries(diaries: &[Diary]) {
    if diaries.is_empty() {
        println!("No diary entries found.");
        return;
    }

    let today = Local::now().date_naive();
    for diary in diaries {
        let row = DiaryRow::from(diary);
        println!(
            "{}  {}  {}  {}",
            row.short_id.yellow(),
            row.date,
            format_days_ago(diary.date, today).dimmed(),
            row.preview
        );
    }
}

pub(super) fn print_diary(diary: &Diary, book: Option<&Book>) {
    let book_label = match book {
        Some(book) => book.to_string(),
        None => format!("unknown book {}", diary.book_id),
    };
    println!("{} {}", format_date(diary.date).bold(), book_label);
    println!("{}", format!("({})", diary.id).dimmed());
    println!("--------------------------------");
    println!("{}", diary.content);
}

fn pad_to_width(s: &str, width: usize) -> String {
    let shown = bookdiary::rows::preview(s, width);
    let padding = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(padding))
}

fn format_days_ago(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    let text = match days {
        0 => "today".to_string(),
        d if d < 0 => "upcoming".to_string(),
        d => Formatter::new().convert(Duration::from_secs(d as u64 * SECONDS_PER_DAY)),
    };
    format!("{:>width$}", text, width = AGE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        bookdiary::model::parse_date(s).unwrap()
    }

    #[test]
    fn days_ago_labels() {
        let today = day("2024-05-10");
        assert_eq!(format_days_ago(today, today).trim(), "today");
        assert_eq!(format_days_ago(day("2024-05-11"), today).trim(), "upcoming");
        assert_eq!(format_days_ago(day("2024-05-07"), today).trim(), "3 days ago");
    }

    #[test]
    fn pads_to_fixed_width() {
        assert_eq!(pad_to_width("Dune", 8), "Dune    ");
        assert_eq!(pad_to_width("A very long title", 8).width(), 8);
    }
}
