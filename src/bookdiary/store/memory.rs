use super::{DataStore, Snapshot};
use crate::error::{BookDiaryError, Result};

/// Store that keeps the last saved snapshot in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    saved: Option<Snapshot>,
    fail_saves: bool,
    save_count: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `snapshot`, as if a data file existed.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            saved: Some(snapshot),
            ..Self::default()
        }
    }

    /// Make every following save fail with an IO error.
    pub fn set_fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    pub fn saved(&self) -> Option<&Snapshot> {
        self.saved.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl DataStore for InMemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        if self.fail_saves {
            return Err(BookDiaryError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "in-memory store is read-only",
            )));
        }
        self.saved = Some(snapshot.clone());
        self.save_count += 1;
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::api::BookManager;
    use crate::model::{Book, Diary};
    use chrono::NaiveDate;

    pub struct LibraryFixture {
        pub manager: BookManager<InMemoryStore>,
    }

    impl Default for LibraryFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl LibraryFixture {
        pub fn new() -> Self {
            Self {
                manager: BookManager::new(InMemoryStore::new()),
            }
        }

        pub fn with_books(mut self, count: usize) -> Self {
            for i in 0..count {
                let book = Book::new(
                    format!("Test Book {}", i + 1),
                    format!("Author {}", i + 1),
                    2000 + i as i32,
                );
                self.manager.add_book(book).unwrap();
            }
            self
        }

        pub fn with_book(mut self, book: Book) -> Self {
            self.manager.add_book(book).unwrap();
            self
        }

        /// Adds a diary entry dated `date` (YYYY-MM-DD) to `book_id`.
        pub fn with_diary(mut self, book_id: &str, date: &str, content: &str) -> Self {
            let date = NaiveDate::parse_from_str(date, crate::model::DATE_FORMAT).unwrap();
            let diary = Diary::new(book_id, content).with_date(date);
            self.manager.add_diary(diary).unwrap();
            self
        }
    }
}
