use super::contains_ci;
use crate::error::{BookDiaryError, Result};
use crate::library::Library;
use crate::model::Diary;

/// Appends the entry to its book's list. Fails with `UnknownBook` (and changes
/// nothing) when `diary.book_id` is not in the library.
pub fn add(library: &mut Library, diary: Diary) -> Result<String> {
    if !library.contains_book(&diary.book_id) {
        return Err(BookDiaryError::UnknownBook(diary.book_id));
    }
    let id = diary.id.clone();
    library.push_diary(diary);
    Ok(id)
}

/// Replaces the entry in place. `false` if the book has no diary list or the
/// list holds no entry with this id.
pub fn update(library: &mut Library, diary: Diary) -> bool {
    library.replace_diary(diary)
}

pub fn delete(library: &mut Library, id: &str) -> bool {
    library.remove_diary(id).is_some()
}

pub fn get<'a>(library: &'a Library, id: &str) -> Option<&'a Diary> {
    library.diary(id)
}

/// Entries for a book, newest date first. Entries sharing a date keep their
/// stored order. Unknown books yield an empty list.
pub fn for_book<'a>(library: &'a Library, book_id: &str) -> Vec<&'a Diary> {
    let mut entries: Vec<&Diary> = library
        .diary_list(book_id)
        .map(|list| list.iter().collect())
        .unwrap_or_default();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Entries of one book whose content contains `query`, ignoring case, in stored order.
pub fn search<'a>(library: &'a Library, book_id: &str, query: &str) -> Vec<&'a Diary> {
    let Some(list) = library.diary_list(book_id) else {
        return Vec::new();
    };
    let query = query.to_lowercase();
    list.iter()
        .filter(|diary| contains_ci(&diary.content, &query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::books;
    use crate::model::{parse_date, Book};

    fn setup() -> (Library, String) {
        let mut library = Library::new();
        let id = books::add(&mut library, Book::new("Dune", "Herbert", 1965));
        (library, id)
    }

    fn entry(book_id: &str, date: &str, content: &str) -> Diary {
        Diary::new(book_id, content).with_date(parse_date(date).unwrap())
    }

    fn dates(entries: &[&Diary]) -> Vec<String> {
        entries.iter().map(|d| d.date.to_string()).collect()
    }

    #[test]
    fn add_to_unknown_book_is_rejected_without_mutation() {
        let (mut library, _) = setup();
        let before = library.to_snapshot();

        let err = add(&mut library, Diary::new("missing", "orphan")).unwrap_err();
        assert!(matches!(err, BookDiaryError::UnknownBook(ref id) if id == "missing"));
        assert_eq!(library.to_snapshot(), before);
    }

    #[test]
    fn add_then_get() {
        let (mut library, book_id) = setup();
        let diary = entry(&book_id, "2024-05-01", "Great start");
        let id = add(&mut library, diary.clone()).unwrap();

        assert_eq!(id, diary.id);
        assert_eq!(get(&library, &id), Some(&diary));
    }

    #[test]
    fn for_book_sorts_by_date_descending() {
        let (mut library, book_id) = setup();
        for date in ["2024-01-01", "2024-03-01", "2024-02-01"] {
            add(&mut library, entry(&book_id, date, date)).unwrap();
        }

        let sorted = for_book(&library, &book_id);
        assert_eq!(dates(&sorted), ["2024-03-01", "2024-02-01", "2024-01-01"]);

        // stored order is untouched
        let stored: Vec<_> = library
            .diary_list(&book_id)
            .unwrap()
            .iter()
            .map(|d| d.date.to_string())
            .collect();
        assert_eq!(stored, ["2024-01-01", "2024-03-01", "2024-02-01"]);
    }

    #[test]
    fn for_book_ties_keep_insertion_order() {
        let (mut library, book_id) = setup();
        add(&mut library, entry(&book_id, "2024-01-01", "first")).unwrap();
        add(&mut library, entry(&book_id, "2024-02-01", "later")).unwrap();
        add(&mut library, entry(&book_id, "2024-01-01", "second")).unwrap();

        let contents: Vec<_> = for_book(&library, &book_id)
            .iter()
            .map(|d| d.content.as_str())
            .collect();
        assert_eq!(contents, ["later", "first", "second"]);
    }

    #[test]
    fn for_unknown_book_is_empty() {
        let (library, _) = setup();
        assert!(for_book(&library, "nope").is_empty());
        assert!(search(&library, "nope", "x").is_empty());
    }

    #[test]
    fn update_replaces_in_place() {
        let (mut library, book_id) = setup();
        let a = entry(&book_id, "2024-01-01", "a");
        let b = entry(&book_id, "2024-01-02", "b");
        add(&mut library, a.clone()).unwrap();
        add(&mut library, b.clone()).unwrap();

        let edited = Diary {
            content: "a, revised".to_string(),
            ..a.clone()
        };
        assert!(update(&mut library, edited.clone()));

        let stored = library.diary_list(&book_id).unwrap();
        assert_eq!(stored[0], edited);
        assert_eq!(stored[1], b);
    }

    #[test]
    fn update_unknown_diary_leaves_list_unchanged() {
        let (mut library, book_id) = setup();
        add(&mut library, entry(&book_id, "2024-01-01", "keep")).unwrap();
        let before = library.diary_list(&book_id).unwrap().to_vec();

        assert!(!update(&mut library, entry(&book_id, "2024-01-01", "stranger")));
        assert!(!update(&mut library, entry("no-such-book", "2024-01-01", "x")));
        assert_eq!(library.diary_list(&book_id).unwrap(), before.as_slice());
    }

    #[test]
    fn update_with_wrong_book_id_fails() {
        let (mut library, book_id) = setup();
        let other = books::add(&mut library, Book::new("Emma", "Austen", 1815));
        let diary = entry(&book_id, "2024-01-01", "x");
        add(&mut library, diary.clone()).unwrap();

        let moved = Diary {
            book_id: other,
            ..diary
        };
        assert!(!update(&mut library, moved));
    }

    #[test]
    fn delete_removes_first_match_only_once() {
        let (mut library, book_id) = setup();
        let id = add(&mut library, entry(&book_id, "2024-01-01", "x")).unwrap();

        assert!(delete(&mut library, &id));
        assert!(get(&library, &id).is_none());
        assert!(!delete(&mut library, &id));
    }

    #[test]
    fn search_matches_content_only() {
        let (mut library, book_id) = setup();
        add(&mut library, entry(&book_id, "2024-02-01", "The spice must flow")).unwrap();
        add(&mut library, entry(&book_id, "2024-01-01", "Sandworms! SPICE everywhere")).unwrap();
        add(&mut library, entry(&book_id, "2024-03-01", "Dune is long")).unwrap();

        let hits: Vec<_> = search(&library, &book_id, "spice")
            .iter()
            .map(|d| d.date.to_string())
            .collect();
        assert_eq!(hits, ["2024-02-01", "2024-01-01"]);

        // the book's title is not part of diary search
        assert_eq!(search(&library, &book_id, "herbert").len(), 0);
    }

    #[test]
    fn search_keeps_stored_order() {
        let (mut library, book_id) = setup();
        add(&mut library, entry(&book_id, "2024-01-01", "spice a")).unwrap();
        add(&mut library, entry(&book_id, "2024-03-01", "spice b")).unwrap();

        let hits: Vec<_> = search(&library, &book_id, "spice")
            .iter()
            .map(|d| d.date.to_string())
            .collect();
        assert_eq!(hits, ["2024-01-01", "2024-03-01"]);
    }
}
