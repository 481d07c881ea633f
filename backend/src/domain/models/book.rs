//! Domain model for a book.

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub year_published: i32,
    pub book_type: Option<i64>,
    pub is_loaned: bool,
}

/// Field values for a book that has not been stored yet, or for replacing a
/// stored book's descriptive fields. Availability is never part of a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub author: String,
    pub year_published: i32,
    pub book_type: Option<i64>,
}

/// Which side of the availability flag a listing selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Loaned,
}

impl Availability {
    pub fn is_loaned(self) -> bool {
        matches!(self, Availability::Loaned)
    }
}
