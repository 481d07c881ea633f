//! Book manager: validation and persistence orchestration for books.
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    commands::book::BookFieldsCommand,
    errors::{LibraryError, LibraryResult},
    models::book::{Availability, Book, BookDraft},
    validation::{required_number, required_text},
};
use crate::storage::{BookStorage, Connection};

#[derive(Clone)]
pub struct BookService<C: Connection> {
    book_repository: C::BookRepository,
}

impl<C: Connection> BookService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            book_repository: connection.create_book_repository(),
        }
    }

    /// Create a book; new books are always available
    pub async fn create_book(&self, command: BookFieldsCommand) -> LibraryResult<Book> {
        let draft = Self::validate(command)?;
        let book = self.book_repository.store_book(&draft).await?;
        info!("Created book {} with ID: {}", book.name, book.id);
        Ok(book)
    }

    pub async fn list_books(&self) -> LibraryResult<Vec<Book>> {
        let books = self.book_repository.list_books().await?;
        info!("Found {} books", books.len());
        Ok(books)
    }

    pub async fn get_book(&self, book_id: i64) -> LibraryResult<Book> {
        match self.book_repository.get_book(book_id).await? {
            Some(book) => Ok(book),
            None => {
                warn!("Book not found: {}", book_id);
                Err(LibraryError::not_found("Book"))
            }
        }
    }

    pub async fn list_available_books(&self) -> LibraryResult<Vec<Book>> {
        Ok(self
            .book_repository
            .list_books_by_availability(Availability::Available)
            .await?)
    }

    pub async fn list_loaned_books(&self) -> LibraryResult<Vec<Book>> {
        Ok(self
            .book_repository
            .list_books_by_availability(Availability::Loaned)
            .await?)
    }

    pub async fn is_book_loaned(&self, book_id: i64) -> LibraryResult<bool> {
        Ok(self.get_book(book_id).await?.is_loaned)
    }

    /// Replace name, author, year and type. The loaned flag is owned by the
    /// loan lifecycle and is never changed here.
    ///
    /// `command` carries the outcome of reading the request body; a missing
    /// book is reported before any body error.
    pub async fn update_book(
        &self,
        book_id: i64,
        command: LibraryResult<BookFieldsCommand>,
    ) -> LibraryResult<Book> {
        let existing = self.get_book(book_id).await?;
        let draft = Self::validate(command?)?;

        if !self.book_repository.update_book(book_id, &draft).await? {
            return Err(LibraryError::not_found("Book"));
        }

        info!("Updated book {} with ID: {}", draft.name, book_id);
        Ok(Book {
            id: book_id,
            name: draft.name,
            author: draft.author,
            year_published: draft.year_published,
            book_type: draft.book_type,
            is_loaned: existing.is_loaned,
        })
    }

    pub async fn delete_book(&self, book_id: i64) -> LibraryResult<()> {
        if !self.book_repository.delete_book(book_id).await? {
            warn!("Book not found for deletion: {}", book_id);
            return Err(LibraryError::not_found("Book"));
        }
        info!("Deleted book with ID: {}", book_id);
        Ok(())
    }

    fn validate(command: BookFieldsCommand) -> LibraryResult<BookDraft> {
        Ok(BookDraft {
            name: required_text(command.name)?,
            author: required_text(command.author)?,
            year_published: required_number(command.year_published)?,
            book_type: command.book_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;

    async fn setup_test() -> BookService<DbConnection> {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        BookService::new(Arc::new(db))
    }

    fn command(name: &str, author: &str, year: i32, book_type: i64) -> BookFieldsCommand {
        BookFieldsCommand {
            name: Some(name.to_string()),
            author: Some(author.to_string()),
            year_published: Some(year),
            book_type: Some(book_type),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_identical_fields() {
        let service = setup_test().await;

        let created = service.create_book(command("X", "Y", 2000, 1)).await.unwrap();
        let fetched = service.get_book(created.id).await.unwrap();

        assert_eq!(fetched.name, "X");
        assert_eq!(fetched.author, "Y");
        assert_eq!(fetched.year_published, 2000);
        assert_eq!(fetched.book_type, Some(1));
        assert!(!fetched.is_loaned);
    }

    #[tokio::test]
    async fn test_create_requires_name_author_and_year() {
        let service = setup_test().await;

        let missing_name = BookFieldsCommand { name: None, ..command("X", "Y", 2000, 1) };
        let missing_author = BookFieldsCommand { author: Some(String::new()), ..command("X", "Y", 2000, 1) };
        let missing_year = BookFieldsCommand { year_published: None, ..command("X", "Y", 2000, 1) };

        for invalid in [missing_name, missing_author, missing_year] {
            let result = service.create_book(invalid).await;
            assert!(matches!(result, Err(LibraryError::Validation(_))));
        }
        assert!(service.list_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_missing_type() {
        let service = setup_test().await;
        let created = service
            .create_book(BookFieldsCommand { book_type: None, ..command("X", "Y", 2000, 1) })
            .await
            .unwrap();
        assert_eq!(created.book_type, None);
    }

    #[tokio::test]
    async fn test_get_and_is_loaned_missing_book_is_not_found() {
        let service = setup_test().await;
        assert!(matches!(service.get_book(5).await, Err(LibraryError::NotFound(_))));
        assert!(matches!(service.is_book_loaned(5).await, Err(LibraryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_new_books_are_listed_as_available() {
        let service = setup_test().await;
        let created = service.create_book(command("X", "Y", 2000, 1)).await.unwrap();

        assert_eq!(service.list_available_books().await.unwrap(), vec![created.clone()]);
        assert!(service.list_loaned_books().await.unwrap().is_empty());
        assert!(!service.is_book_loaned(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_checks_existence_before_validation() {
        let service = setup_test().await;

        let result = service.update_book(77, Ok(BookFieldsCommand::default())).await;
        assert!(matches!(result, Err(LibraryError::NotFound(_))));
        let result = service.update_book(77, Err(LibraryError::invalid_data())).await;
        assert!(matches!(result, Err(LibraryError::NotFound(_))));

        let created = service.create_book(command("X", "Y", 2000, 1)).await.unwrap();
        let result = service.update_book(created.id, Ok(BookFieldsCommand::default())).await;
        assert!(matches!(result, Err(LibraryError::Validation(_))));
        let result = service.update_book(created.id, Err(LibraryError::invalid_data())).await;
        assert!(matches!(result, Err(LibraryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let service = setup_test().await;
        let created = service.create_book(command("X", "Y", 2000, 1)).await.unwrap();

        let updated = service
            .update_book(created.id, Ok(command("Z", "W", 2010, 3)))
            .await
            .unwrap();
        assert_eq!(updated, service.get_book(created.id).await.unwrap());
        assert_eq!(updated.name, "Z");
        assert_eq!(updated.book_type, Some(3));
    }

    #[tokio::test]
    async fn test_delete_book() {
        let service = setup_test().await;
        let created = service.create_book(command("X", "Y", 2000, 1)).await.unwrap();

        service.delete_book(created.id).await.unwrap();
        assert!(matches!(service.get_book(created.id).await, Err(LibraryError::NotFound(_))));
        assert!(matches!(service.delete_book(created.id).await, Err(LibraryError::NotFound(_))));
    }
}
