//! Error taxonomy shared by the entity managers.

/// Errors surfaced by the book, customer, and loan services
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),
    /// A referenced record does not exist
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    DateParse {
        value: String,
        /// Absent when the text is not shaped like YYYY-MM-DD
        #[source]
        source: Option<chrono::ParseError>,
    },
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LibraryError {
    pub fn invalid_data() -> Self {
        LibraryError::Validation("Invalid data".to_string())
    }

    pub fn not_found(entity: &str) -> Self {
        LibraryError::NotFound(format!("{} not found", entity))
    }
}

pub type LibraryResult<T> = Result<T, LibraryError>;
