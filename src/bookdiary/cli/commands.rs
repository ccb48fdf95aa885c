use super::print::{print_book, print_books, print_diaries, print_diary, print_info, print_success};
use super::setup::{init_logging, BookCommands, Cli, Commands, DiaryCommands};
use bookdiary::api::BookManager;
use bookdiary::config::{self, BookDiaryConfig, DATA_FILE_ENV, KEYS};
use bookdiary::error::{BookDiaryError, Result};
use bookdiary::model::{Book, Diary};
use bookdiary::store::fs::FileStore;
use bookdiary::validation::{parse_date, parse_year, require};
use clap::Parser;
use std::path::PathBuf;

struct AppContext {
    manager: BookManager<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        // Config does not need the library
        Some(Commands::Config { key, value, unset }) => handle_config(key, value, unset),
        Some(Commands::Book(cmd)) => {
            let mut ctx = init_context(cli.data_file)?;
            handle_book(&mut ctx, cmd)
        }
        Some(Commands::Diary(cmd)) => {
            let mut ctx = init_context(cli.data_file)?;
            handle_diary(&mut ctx, cmd)
        }
        None => {
            let mut ctx = init_context(cli.data_file)?;
            handle_book(&mut ctx, BookCommands::List { search: None })
        }
    }
}

fn init_context(data_file_flag: Option<PathBuf>) -> Result<AppContext> {
    let config = match config::config_dir() {
        Ok(dir) => BookDiaryConfig::load(dir).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable config");
            BookDiaryConfig::default()
        }),
        Err(_) => BookDiaryConfig::default(),
    };
    let data_file = config.resolve_data_file(data_file_flag, std::env::var_os(DATA_FILE_ENV));
    let store = FileStore::new(data_file);
    tracing::debug!(path = %store.path().display(), "using data file");

    store.ensure_parent_dir()?;
    let manager = BookManager::open(store)?;
    Ok(AppContext { manager })
}

// --- books ---

fn handle_book(ctx: &mut AppContext, cmd: BookCommands) -> Result<()> {
    match cmd {
        BookCommands::Add {
            title,
            author,
            year,
            genre,
            memo,
        } => {
            let book = Book::new(
                require("Title", &title)?,
                require("Author", &author)?,
                parse_year(&year)?,
            )
            .with_genre(genre.trim())
            .with_memo(memo);
            let label = book.to_string();
            let id = ctx.manager.add_book(book)?;
            print_success(&format!("Book added: {}", label));
            print_info(&id);
            Ok(())
        }
        BookCommands::List { search } => {
            let books = match search.as_deref().map(str::trim) {
                Some(query) if !query.is_empty() => ctx.manager.search_books(query),
                _ => ctx.manager.list_books(),
            };
            print_books(&books);
            Ok(())
        }
        BookCommands::Show { id } => {
            let book = find_book(ctx, &id)?;
            let count = ctx.manager.get_diaries_for_book(&book.id).len();
            print_book(&book, count);
            Ok(())
        }
        BookCommands::Edit {
            id,
            title,
            author,
            year,
            genre,
            memo,
        } => {
            let mut book = find_book(ctx, &id)?;
            if let Some(title) = title {
                book.title = require("Title", &title)?;
            }
            if let Some(author) = author {
                book.author = require("Author", &author)?;
            }
            if let Some(year) = year {
                book.published_year = parse_year(&year)?;
            }
            if let Some(genre) = genre {
                book.genre = genre.trim().to_string();
            }
            if let Some(memo) = memo {
                book.memo = memo;
            }
            let label = book.to_string();
            if ctx.manager.update_book(book)? {
                print_success(&format!("Book updated: {}", label));
                Ok(())
            } else {
                Err(BookDiaryError::Api("Failed to update book".into()))
            }
        }
        BookCommands::Delete { id } => {
            let book = find_book(ctx, &id)?;
            let entries = ctx.manager.get_diaries_for_book(&book.id).len();
            if ctx.manager.delete_book(&book.id)? {
                print_success(&format!(
                    "Book deleted: {} ({} diary entries removed)",
                    book.title, entries
                ));
                Ok(())
            } else {
                Err(BookDiaryError::Api("Failed to delete book".into()))
            }
        }
    }
}

fn find_book(ctx: &AppContext, input: &str) -> Result<Book> {
    let id = ctx.manager.resolve_book_id(input)?;
    ctx.manager
        .get_book(&id)
        .ok_or_else(|| BookDiaryError::Api(format!("No book matches id {}", input)))
}

// --- diaries ---

fn handle_diary(ctx: &mut AppContext, cmd: DiaryCommands) -> Result<()> {
    match cmd {
        DiaryCommands::Add {
            book,
            content,
            date,
        } => {
            let book = find_book(ctx, &book)?;
            let mut diary = Diary::new(book.id.clone(), require("Content", &content)?);
            if let Some(date) = date {
                diary = diary.with_date(parse_date(&date)?);
            }
            let id = ctx.manager.add_diary(diary)?;
            print_success(&format!("Diary entry added to {}", book.title));
            print_info(&id);
            Ok(())
        }
        DiaryCommands::List { book, search } => {
            let book = find_book(ctx, &book)?;
            let diaries = match search.as_deref().map(str::trim) {
                Some(query) if !query.is_empty() => ctx.manager.search_diaries(&book.id, query),
                _ => ctx.manager.get_diaries_for_book(&book.id),
            };
            print_diaries(&diaries);
            Ok(())
        }
        DiaryCommands::Show { id } => {
            let diary = find_diary(ctx, &id)?;
            let book = ctx.manager.get_book(&diary.book_id);
            print_diary(&diary, book.as_ref());
            Ok(())
        }
        DiaryCommands::Edit { id, content, date } => {
            let mut diary = find_diary(ctx, &id)?;
            if let Some(content) = content {
                diary.content = require("Content", &content)?;
            }
            if let Some(date) = date {
                diary.date = parse_date(&date)?;
            }
            if ctx.manager.update_diary(diary)? {
                print_success("Diary entry updated");
                Ok(())
            } else {
                Err(BookDiaryError::Api("Failed to update diary entry".into()))
            }
        }
        DiaryCommands::Delete { id } => {
            let diary = find_diary(ctx, &id)?;
            if ctx.manager.delete_diary(&diary.id)? {
                print_success(&format!("Diary entry deleted: {}", diary));
                Ok(())
            } else {
                Err(BookDiaryError::Api("Failed to delete diary entry".into()))
            }
        }
    }
}

fn find_diary(ctx: &AppContext, input: &str) -> Result<Diary> {
    let id = ctx.manager.resolve_diary_id(input)?;
    ctx.manager
        .get_diary(&id)
        .ok_or_else(|| BookDiaryError::Api(format!("No diary entry matches id {}", input)))
}

// --- config ---

fn handle_config(key: Option<String>, value: Option<String>, unset: bool) -> Result<()> {
    let dir = config::config_dir()?;
    let mut config = BookDiaryConfig::load(&dir)?;

    match (key, value) {
        (None, _) => {
            for key in KEYS {
                if let Some(value) = config.get(key) {
                    println!("{} = {}", key, value);
                }
            }
        }
        (Some(key), None) if unset => {
            config.unset(&key)?;
            config.save(&dir)?;
            print_success(&format!("{} unset", key));
        }
        (Some(key), None) => match config.get(&key) {
            Some(value) => println!("{}", value),
            None => return Err(BookDiaryError::Api(format!("Unknown config key: {}", key))),
        },
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&dir)?;
            let shown = config.get(&key).unwrap_or(value);
            print_success(&format!("{} set to {}", key, shown));
        }
    }
    Ok(())
}
