use super::contains_ci;
use crate::library::Library;
use crate::model::Book;

/// Inserts unconditionally (an existing id is overwritten) and makes sure the
/// book has a diary list.
pub fn add(library: &mut Library, book: Book) -> String {
    let id = book.id.clone();
    library.insert_book(book);
    library.ensure_diary_list(&id);
    id
}

/// Replaces the whole record. `false` if no book has this id.
pub fn update(library: &mut Library, book: Book) -> bool {
    if !library.contains_book(&book.id) {
        return false;
    }
    library.insert_book(book);
    true
}

/// Removes the book and every diary entry filed under it.
pub fn delete(library: &mut Library, id: &str) -> bool {
    library.remove_book(id).is_some()
}

pub fn get<'a>(library: &'a Library, id: &str) -> Option<&'a Book> {
    library.book(id)
}

pub fn list(library: &Library) -> Vec<&Book> {
    library.books().collect()
}

/// Books whose title, author, genre or memo contains `query`, ignoring case.
pub fn search<'a>(library: &'a Library, query: &str) -> Vec<&'a Book> {
    let query = query.to_lowercase();
    library
        .books()
        .filter(|book| {
            contains_ci(&book.title, &query)
                || contains_ci(&book.author, &query)
                || contains_ci(&book.genre, &query)
                || contains_ci(&book.memo, &query)
        })
        .collect()
}
