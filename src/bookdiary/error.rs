use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookDiaryError {
    /// A diary entry referenced a book that is not in the library.
    #[error("Book with ID {0} does not exist")]
    UnknownBook(String),

    #[error("Invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Invalid year: {0}")]
    InvalidYear(String),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BookDiaryError>;
