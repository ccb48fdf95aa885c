//! # Library Aggregate
//!
//! [`Library`] is the in-memory state behind the repository: every book keyed by id,
//! and every book's diary entries as an ordered list. Both collections remember
//! insertion order, which is the order used for listing and for the persisted file.
//!
//! A secondary `diary id -> book id` index makes lookups by diary id O(1). Diary ids are
//! unique in practice but not enforced, so the index always points at the *first* list
//! (in list order) holding a given id, the same entry a front-to-back scan would find.
//!
//! The primitives here do no persistence and no referential checks; those rules live in
//! [`crate::commands`].

use crate::error::Result;
use crate::model::{Book, Diary};
use crate::store::Snapshot;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct Library {
    books: HashMap<String, Book>,
    book_order: Vec<String>,
    diaries: HashMap<String, Vec<Diary>>,
    diary_order: Vec<String>,
    diary_owner: HashMap<String, String>,
    // Diary ids seen in more than one slot; only these need a rescan on removal.
    duplicate_ids: HashSet<String>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    // --- books ---

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn contains_book(&self, id: &str) -> bool {
        self.books.contains_key(id)
    }

    /// Books in insertion order.
    pub fn books(&self) -> impl Iterator<Item = &Book> {
        self.book_order.iter().filter_map(|id| self.books.get(id))
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Inserts or overwrites. An overwritten book keeps its original position.
    pub fn insert_book(&mut self, book: Book) {
        if !self.books.contains_key(&book.id) {
            self.book_order.push(book.id.clone());
        }
        self.books.insert(book.id.clone(), book);
    }

    /// Removes the book and, with it, its whole diary list.
    pub fn remove_book(&mut self, id: &str) -> Option<Book> {
        let book = self.books.remove(id)?;
        self.book_order.retain(|b| b != id);
        self.remove_diary_list(id);
        Some(book)
    }

    // --- diaries ---

    pub fn has_diary_list(&self, book_id: &str) -> bool {
        self.diaries.contains_key(book_id)
    }

    /// The stored (insertion ordered) diary list for a book.
    pub fn diary_list(&self, book_id: &str) -> Option<&[Diary]> {
        self.diaries.get(book_id).map(Vec::as_slice)
    }

    pub fn diary_count(&self) -> usize {
        self.diaries.values().map(Vec::len).sum()
    }

    pub fn ensure_diary_list(&mut self, book_id: &str) {
        if !self.diaries.contains_key(book_id) {
            self.diaries.insert(book_id.to_string(), Vec::new());
            self.diary_order.push(book_id.to_string());
        }
    }

    /// Every diary entry, list by list, each list in stored order.
    pub fn all_diaries(&self) -> impl Iterator<Item = &Diary> {
        self.diary_order
            .iter()
            .filter_map(|book_id| self.diaries.get(book_id))
            .flatten()
    }

    pub fn diary(&self, id: &str) -> Option<&Diary> {
        let owner = self.diary_owner.get(id)?;
        self.diaries.get(owner)?.iter().find(|d| d.id == id)
    }

    /// Appends to the list stored under `diary.book_id`, creating it if needed.
    pub fn push_diary(&mut self, diary: Diary) {
        let book_id = diary.book_id.clone();
        self.push_diary_into(&book_id, diary);
    }

    /// Replaces the entry with the same id inside `diary.book_id`'s list, in place.
    pub fn replace_diary(&mut self, diary: Diary) -> bool {
        let Some(list) = self.diaries.get_mut(&diary.book_id) else {
            return false;
        };
        match list.iter_mut().find(|d| d.id == diary.id) {
            Some(slot) => {
                *slot = diary;
                true
            }
            None => false,
        }
    }

    /// Removes the first entry with this id, searching lists in order.
    pub fn remove_diary(&mut self, id: &str) -> Option<Diary> {
        let owner = self.diary_owner.get(id)?.clone();
        let list = self.diaries.get_mut(&owner)?;
        let pos = list.iter().position(|d| d.id == id)?;
        let removed = list.remove(pos);
        self.reindex_diary(id);
        Some(removed)
    }

    fn push_diary_into(&mut self, book_id: &str, diary: Diary) {
        self.ensure_diary_list(book_id);
        let id = diary.id.clone();
        if let Some(list) = self.diaries.get_mut(book_id) {
            list.push(diary);
        }
        if self.diary_owner.contains_key(&id) {
            tracing::warn!(diary_id = %id, "duplicate diary id");
            self.duplicate_ids.insert(id.clone());
            self.reindex_diary(&id);
        } else {
            self.diary_owner.insert(id, book_id.to_string());
        }
    }

    fn remove_diary_list(&mut self, book_id: &str) {
        self.clear_diary_list(book_id);
        if self.diaries.remove(book_id).is_some() {
            self.diary_order.retain(|b| b != book_id);
        }
    }

    /// Empties a list in place, keeping its position in the list order.
    fn clear_diary_list(&mut self, book_id: &str) {
        let Some(list) = self.diaries.get_mut(book_id).map(std::mem::take) else {
            return;
        };
        for diary in list {
            if self.duplicate_ids.contains(&diary.id) {
                self.reindex_diary(&diary.id);
            } else {
                self.diary_owner.remove(&diary.id);
            }
        }
    }

    /// Points the index at the first list that still holds `id`, or drops the entry.
    fn reindex_diary(&mut self, id: &str) {
        if !self.duplicate_ids.contains(id) {
            self.diary_owner.remove(id);
            return;
        }
        let owner = self
            .diary_order
            .iter()
            .find(|book_id| {
                self.diaries
                    .get(*book_id)
                    .is_some_and(|list| list.iter().any(|d| d.id == id))
            })
            .cloned();
        match owner {
            Some(book_id) => {
                self.diary_owner.insert(id.to_string(), book_id);
            }
            None => {
                self.diary_owner.remove(id);
                self.duplicate_ids.remove(id);
            }
        }
    }

    // --- snapshot conversion ---

    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            books: self
                .books()
                .map(|book| (book.id.clone(), book.to_record()))
                .collect(),
            diaries: self
                .diary_order
                .iter()
                .filter_map(|book_id| {
                    self.diaries.get(book_id).map(|list| {
                        (
                            book_id.clone(),
                            list.iter().map(Diary::to_record).collect(),
                        )
                    })
                })
                .collect(),
        }
    }

    /// Builds a library from a persisted document. Fails on the first diary whose
    /// date is malformed; nothing partial is returned.
    ///
    /// Books are keyed by their map key. A repeated diary list key keeps its first
    /// position and its last list.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self> {
        let mut library = Self::new();
        for (key, record) in snapshot.books {
            let mut book = Book::from_record(record);
            if book.id != key {
                tracing::warn!(
                    key = %key,
                    record_id = %book.id,
                    "book record id differs from its key"
                );
                book.id = key;
            }
            library.insert_book(book);
        }
        for (book_id, records) in snapshot.diaries {
            if !library.contains_book(&book_id) {
                tracing::warn!(book_id = %book_id, "diary list for unknown book");
            }
            if library.has_diary_list(&book_id) {
                tracing::warn!(book_id = %book_id, "repeated diary list, keeping the last one");
                library.clear_diary_list(&book_id);
            }
            library.ensure_diary_list(&book_id);
            for record in records {
                let diary = Diary::from_record(record)?;
                library.push_diary_into(&book_id, diary);
            }
        }
        Ok(library)
    }
}
