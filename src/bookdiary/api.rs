//! # API Facade
//!
//! [`BookManager`] is the repository every front-end talks to. It owns the in-memory
//! [`Library`] and a [`DataStore`], dispatches each operation to the command layer, and
//! rewrites the store after every successful mutation.
//!
//! ## Return Conventions
//!
//! - Lookups return `Option<T>` / `Vec<T>`: absence is not an error.
//! - `update_*` / `delete_*` return `Ok(false)` for an unknown id and do not save.
//! - `add_diary` returns `Err(UnknownBook)` for an unknown book and does not save.
//! - Any save failure comes back as `Err`. The mutation stays applied in memory, so the
//!   next successful save brings the file up to date.
//!
//! ## Generic Over DataStore
//!
//! - Production: `BookManager<FileStore>`
//! - Testing: `BookManager<InMemoryStore>`

use crate::commands::{self, helpers::resolve_id};
use crate::error::Result;
use crate::library::Library;
use crate::model::{Book, Diary};
use crate::store::DataStore;

pub struct BookManager<S: DataStore> {
    library: Library,
    store: S,
}

impl<S: DataStore> BookManager<S> {
    /// An empty manager. Nothing is read from `store` until [`load`](Self::load).
    pub fn new(store: S) -> Self {
        Self {
            library: Library::new(),
            store,
        }
    }

    /// Creates a manager and loads whatever `store` holds.
    pub fn open(store: S) -> Result<Self> {
        let mut manager = Self::new(store);
        manager.load()?;
        Ok(manager)
    }

    /// Replaces the in-memory state with the stored document.
    ///
    /// `Ok(false)` when nothing is stored yet. On a decode error the current state is
    /// left exactly as it was.
    pub fn load(&mut self) -> Result<bool> {
        let snapshot = match self.store.load() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return Ok(false),
            Err(e) => {
                tracing::warn!(error = %e, "could not load library");
                return Err(e);
            }
        };
        let library = Library::from_snapshot(snapshot).inspect_err(|e| {
            tracing::warn!(error = %e, "could not decode library");
        })?;
        tracing::debug!(
            books = library.book_count(),
            diaries = library.diary_count(),
            "library loaded"
        );
        self.library = library;
        Ok(true)
    }

    /// Writes the full state to the store.
    pub fn save(&mut self) -> Result<()> {
        let snapshot = self.library.to_snapshot();
        self.store.save(&snapshot).inspect_err(|e| {
            tracing::error!(error = %e, "failed to save library; changes are only in memory");
        })
    }

    // --- books ---

    pub fn add_book(&mut self, book: Book) -> Result<String> {
        let id = commands::books::add(&mut self.library, book);
        self.save()?;
        Ok(id)
    }

    pub fn update_book(&mut self, book: Book) -> Result<bool> {
        if !commands::books::update(&mut self.library, book) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Deletes the book together with all of its diary entries.
    pub fn delete_book(&mut self, id: &str) -> Result<bool> {
        if !commands::books::delete(&mut self.library, id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn get_book(&self, id: &str) -> Option<Book> {
        commands::books::get(&self.library, id).cloned()
    }

    pub fn list_books(&self) -> Vec<Book> {
        commands::books::list(&self.library)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search_books(&self, query: &str) -> Vec<Book> {
        commands::books::search(&self.library, query)
            .into_iter()
            .cloned()
            .collect()
    }

    // --- diaries ---

    pub fn add_diary(&mut self, diary: Diary) -> Result<String> {
        let id = commands::diaries::add(&mut self.library, diary)?;
        self.save()?;
        Ok(id)
    }

    pub fn update_diary(&mut self, diary: Diary) -> Result<bool> {
        if !commands::diaries::update(&mut self.library, diary) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn delete_diary(&mut self, id: &str) -> Result<bool> {
        if !commands::diaries::delete(&mut self.library, id) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    pub fn get_diary(&self, id: &str) -> Option<Diary> {
        commands::diaries::get(&self.library, id).cloned()
    }

    pub fn get_diaries_for_book(&self, book_id: &str) -> Vec<Diary> {
        commands::diaries::for_book(&self.library, book_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search_diaries(&self, book_id: &str, query: &str) -> Vec<Diary> {
        commands::diaries::search(&self.library, book_id, query)
            .into_iter()
            .cloned()
            .collect()
    }

    // --- id resolution ---

    /// Accepts a full book id or any unique prefix of one.
    pub fn resolve_book_id(&self, input: &str) -> Result<String> {
        resolve_id(
            "book",
            self.library.books().map(|b| b.id.as_str()),
            input,
        )
    }

    /// Accepts a full diary id or any unique prefix of one.
    pub fn resolve_diary_id(&self, input: &str) -> Result<String> {
        resolve_id(
            "diary entry",
            self.library.all_diaries().map(|d| d.id.as_str()),
            input,
        )
    }

    // --- accessors ---

    pub fn book_count(&self) -> usize {
        self.library.book_count()
    }

    pub fn diary_count(&self) -> usize {
        self.library.diary_count()
    }

    pub fn is_empty(&self) -> bool {
        self.library.book_count() == 0 && self.library.diary_count() == 0
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
