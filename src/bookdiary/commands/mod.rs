//! # Command Layer
//!
//! Repository rules over a [`Library`](crate::library::Library): referential integrity,
//! not-found outcomes, search and ordering. Nothing here touches storage; the
//! [`api`](crate::api) facade persists after a command reports a change.
//!
//! Not-found is an expected outcome and comes back as `false` / `None`. The only
//! command that fails with an error is [`diaries::add`] when the book is unknown.

pub mod books;
pub mod diaries;
pub mod helpers;

/// Case-insensitive substring test. `needle` must already be lowercased.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
