//! # Storage Layer
//!
//! Persistence for the library is a single JSON document, read once at startup and
//! rewritten in full after every mutation. The [`DataStore`] trait keeps that contract
//! separate from the repository logic so tests can run without a filesystem.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production JSON file (default `book_data.json`)
//!   - Pretty-printed UTF-8
//!   - Written to a temp file in the same directory, then renamed over the target
//!   - Parent directory is created on first save
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - Keeps the last saved snapshot
//!   - Can be switched to fail every save
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "books":   { "<id>": {"id", "title", "author", "publishedYear", "genre", "memo"}, ... },
//!   "diaries": { "<bookId>": [ {"id", "bookId", "date", "content"}, ... ], ... }
//! }
//! ```
//!
//! There is no version field. Object key order is significant: it is the insertion
//! order of books and diary lists, so [`Snapshot`] keeps entries as ordered pairs
//! instead of a hash map.

use crate::error::Result;
use crate::model::{BookRecord, DiaryRecord};
use serde::{Deserialize, Serialize};

pub mod fs;
pub mod memory;

/// The whole persisted document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, with = "ordered")]
    pub books: Vec<(String, BookRecord)>,
    #[serde(default, with = "ordered")]
    pub diaries: Vec<(String, Vec<DiaryRecord>)>,
}

/// Abstract interface for library persistence.
pub trait DataStore {
    /// Read the stored document. `Ok(None)` means nothing has been stored yet.
    fn load(&self) -> Result<Option<Snapshot>>;

    /// Replace the stored document with `snapshot`.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// (De)serializes `Vec<(String, V)>` as a JSON object, keeping key order.
mod ordered {
    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde::ser::{Serialize, Serializer};
    use std::fmt;
    use std::marker::PhantomData;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S, V>(entries: &Vec<(String, V)>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_map(entries.iter().map(|(key, value)| (key, value)))
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Vec<(String, V)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    entries.push((key, value));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> BookRecord {
        BookRecord {
            id: id.to_string(),
            title: format!("Title {id}"),
            author: "Author".to_string(),
            published_year: 2000,
            genre: String::new(),
            memo: String::new(),
        }
    }

    #[test]
    fn keeps_key_order_through_json() {
        let snapshot = Snapshot {
            books: vec![
                ("zeta".into(), record("zeta")),
                ("alpha".into(), record("alpha")),
                ("mid".into(), record("mid")),
            ],
            diaries: vec![("zeta".into(), vec![]), ("alpha".into(), vec![])],
        };

        let json = serde_json::to_string_pretty(&snapshot).unwrap();
        assert!(json.find("\"zeta\"").unwrap() < json.find("\"alpha\"").unwrap());

        let parsed: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn missing_top_level_keys_default_to_empty() {
        let parsed: Snapshot = serde_json::from_str("{}").unwrap();
        assert!(parsed.books.is_empty());
        assert!(parsed.diaries.is_empty());
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(serde_json::from_str::<Snapshot>(r#"{"books": []}"#).is_err());
        assert!(serde_json::from_str::<Snapshot>(r#"{"diaries": {"b": {}}}"#).is_err());
    }
}
