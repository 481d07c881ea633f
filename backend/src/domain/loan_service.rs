//! Loan manager.
//!
//! Owns the one cross-entity rule of the system: a book's `is_loaned` flag is
//! set when a loan referencing it is created and cleared when that loan is
//! deleted. Both writes go through a single storage call that also checks the
//! book, so they commit or fail together. Updating a loan never touches book
//! availability.
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{
    commands::loan::LoanFieldsCommand,
    errors::{LibraryError, LibraryResult},
    models::loan::{Loan, LoanDraft, DATE_FORMAT},
    validation::{required_number, required_text},
};
use crate::storage::{Connection, LoanStorage};

#[derive(Clone)]
pub struct LoanService<C: Connection> {
    loan_repository: C::LoanRepository,
}

impl<C: Connection> LoanService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            loan_repository: connection.create_loan_repository(),
        }
    }

    /// Open a loan and mark the book as loaned.
    ///
    /// The body is validated first; the book must exist. Nothing is written
    /// when either check fails. The customer id is not checked.
    pub async fn create_loan(&self, command: LoanFieldsCommand) -> LibraryResult<Loan> {
        let draft = Self::validate(command)?;

        let Some(loan) = self.loan_repository.open_loan(&draft).await? else {
            warn!("Cannot create loan, book not found: {}", draft.book_id);
            return Err(LibraryError::not_found("Book"));
        };
        info!(
            "Created loan {} of book {} to customer {}",
            loan.id, loan.book_id, loan.customer_id
        );
        Ok(loan)
    }

    pub async fn list_loans(&self) -> LibraryResult<Vec<Loan>> {
        let loans = self.loan_repository.list_loans().await?;
        info!("Found {} loans", loans.len());
        Ok(loans)
    }

    pub async fn get_loan(&self, loan_id: i64) -> LibraryResult<Loan> {
        match self.loan_repository.get_loan(loan_id).await? {
            Some(loan) => Ok(loan),
            None => {
                warn!("Loan not found: {}", loan_id);
                Err(LibraryError::not_found("Loan"))
            }
        }
    }

    pub async fn list_loans_by_book(&self, book_id: i64) -> LibraryResult<Vec<Loan>> {
        Ok(self.loan_repository.list_loans_by_book(book_id).await?)
    }

    pub async fn list_loans_by_customer(&self, customer_id: i64) -> LibraryResult<Vec<Loan>> {
        Ok(self.loan_repository.list_loans_by_customer(customer_id).await?)
    }

    /// Replace every field of a loan without adjusting any book's availability
    pub async fn update_loan(
        &self,
        loan_id: i64,
        command: LibraryResult<LoanFieldsCommand>,
    ) -> LibraryResult<Loan> {
        self.get_loan(loan_id).await?;
        let draft = Self::validate(command?)?;

        if !self.loan_repository.update_loan(loan_id, &draft).await? {
            return Err(LibraryError::not_found("Loan"));
        }

        info!("Updated loan with ID: {}", loan_id);
        Ok(Loan {
            id: loan_id,
            customer_id: draft.customer_id,
            book_id: draft.book_id,
            loan_date: draft.loan_date,
            return_date: draft.return_date,
        })
    }

    /// Delete a loan and mark its book as available again.
    ///
    /// Fails without writing if the loan's book no longer exists.
    pub async fn delete_loan(&self, loan_id: i64) -> LibraryResult<()> {
        let loan = self.get_loan(loan_id).await?;

        if !self.loan_repository.close_loan(loan.id, loan.book_id).await? {
            warn!("Book {} not found for loan {}", loan.book_id, loan_id);
            return Err(LibraryError::NotFound("Book not found for the loan".to_string()));
        }
        info!("Deleted loan {} and released book {}", loan.id, loan.book_id);
        Ok(())
    }

    fn validate(command: LoanFieldsCommand) -> LibraryResult<LoanDraft> {
        let customer_id = required_number(command.customer_id)?;
        let book_id = required_number(command.book_id)?;
        let loan_date = parse_date(&required_text(command.loan_date)?)?;
        let return_date = match command.return_date {
            Some(value) if !value.trim().is_empty() => Some(parse_date(value.trim())?),
            _ => None,
        };

        Ok(LoanDraft {
            customer_id,
            book_id,
            loan_date,
            return_date,
        })
    }
}

/// Parse a YYYY-MM-DD calendar date.
///
/// The year must be exactly four digits and month and day zero-padded.
pub fn parse_date(value: &str) -> LibraryResult<NaiveDate> {
    if !has_iso_date_shape(value) {
        return Err(LibraryError::DateParse {
            value: value.to_string(),
            source: None,
        });
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| LibraryError::DateParse {
        value: value.to_string(),
        source: Some(source),
    })
}

fn has_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book_service::BookService;
    use crate::domain::commands::book::BookFieldsCommand;
    use crate::storage::DbConnection;

    struct Fixture {
        loans: LoanService<DbConnection>,
        books: BookService<DbConnection>,
    }

    async fn setup_test() -> Fixture {
        let db = Arc::new(DbConnection::init_test().await.expect("Failed to create test database"));
        Fixture {
            loans: LoanService::new(db.clone()),
            books: BookService::new(db),
        }
    }

    async fn create_book(fixture: &Fixture) -> i64 {
        fixture
            .books
            .create_book(BookFieldsCommand {
                name: Some("X".to_string()),
                author: Some("Y".to_string()),
                year_published: Some(2000),
                book_type: Some(1),
            })
            .await
            .expect("Failed to create book")
            .id
    }

    fn command(book_id: i64, loan_date: &str) -> LoanFieldsCommand {
        LoanFieldsCommand {
            customer_id: Some(1),
            book_id: Some(book_id),
            loan_date: Some(loan_date.to_string()),
            return_date: None,
        }
    }

    #[test]
    fn test_parse_date_accepts_only_iso_calendar_dates() {
        assert_eq!(parse_date("2024-02-29").unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        for bad in [
            "2023-02-29",
            "15/01/2024",
            "2024-1-5x",
            "yesterday",
            "",
            "24-01-15",
            "+2024-01-15",
            "2024-01- 5",
            "12024-01-01",
            "2024-001-5",
        ] {
            assert!(matches!(parse_date(bad), Err(LibraryError::DateParse { .. })), "{}", bad);
        }
    }

    #[tokio::test]
    async fn test_create_then_delete_toggles_is_loaned() {
        let fixture = setup_test().await;
        let book_id = create_book(&fixture).await;

        let loan = fixture.loans.create_loan(command(book_id, "2024-01-15")).await.unwrap();
        assert!(fixture.books.is_book_loaned(book_id).await.unwrap());
        assert!(fixture.books.list_available_books().await.unwrap().is_empty());

        fixture.loans.delete_loan(loan.id).await.unwrap();
        assert!(!fixture.books.is_book_loaned(book_id).await.unwrap());
        let available: Vec<i64> = fixture
            .books
            .list_available_books()
            .await
            .unwrap()
            .iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(available, vec![book_id]);
    }

    #[tokio::test]
    async fn test_create_for_missing_book_writes_nothing() {
        let fixture = setup_test().await;
        let book_id = create_book(&fixture).await;

        let result = fixture.loans.create_loan(command(book_id + 100, "2024-01-15")).await;

        assert!(matches!(result, Err(LibraryError::NotFound(_))));
        assert!(fixture.loans.list_loans().await.unwrap().is_empty());
        assert!(!fixture.books.is_book_loaned(book_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_or_malformed_dates() {
        let fixture = setup_test().await;
        let book_id = create_book(&fixture).await;

        let missing = LoanFieldsCommand { loan_date: None, ..command(book_id, "2024-01-15") };
        assert!(matches!(fixture.loans.create_loan(missing).await, Err(LibraryError::Validation(_))));

        let malformed = command(book_id, "01/15/2024");
        assert!(matches!(fixture.loans.create_loan(malformed).await, Err(LibraryError::DateParse { .. })));

        let bad_return = LoanFieldsCommand {
            return_date: Some("soon".to_string()),
            ..command(book_id, "2024-01-15")
        };
        assert!(matches!(fixture.loans.create_loan(bad_return).await, Err(LibraryError::DateParse { .. })));

        assert!(fixture.loans.list_loans().await.unwrap().is_empty());
        assert!(!fixture.books.is_book_loaned(book_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_validates_before_looking_up_book() {
        let fixture = setup_test().await;
        let result = fixture
            .loans
            .create_loan(LoanFieldsCommand { customer_id: None, ..command(999, "2024-01-15") })
            .await;
        assert!(matches!(result, Err(LibraryError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_return_date_means_open_loan() {
        let fixture = setup_test().await;
        let book_id = create_book(&fixture).await;

        let loan = fixture
            .loans
            .create_loan(LoanFieldsCommand {
                return_date: Some(String::new()),
                ..command(book_id, "2024-01-15")
            })
            .await
            .unwrap();
        assert!(loan.is_active());
    }

    #[tokio::test]
    async fn test_filtered_lists() {
        let fixture = setup_test().await;
        let first = create_book(&fixture).await;
        let second = create_book(&fixture).await;

        let a = fixture.loans.create_loan(command(first, "2024-01-01")).await.unwrap();
        let b = fixture
            .loans
            .create_loan(LoanFieldsCommand { customer_id: Some(2), ..command(second, "2024-01-02") })
            .await
            .unwrap();

        assert_eq!(fixture.loans.list_loans_by_book(second).await.unwrap(), vec![b.clone()]);
        assert_eq!(fixture.loans.list_loans_by_customer(1).await.unwrap(), vec![a.clone()]);
        assert_eq!(fixture.loans.list_loans().await.unwrap(), vec![a, b]);
    }

    #[tokio::test]
    async fn test_update_does_not_touch_book_availability() {
        let fixture = setup_test().await;
        let first = create_book(&fixture).await;
        let second = create_book(&fixture).await;
        let loan = fixture.loans.create_loan(command(first, "2024-01-01")).await.unwrap();

        let updated = fixture
            .loans
            .update_loan(
                loan.id,
                Ok(LoanFieldsCommand {
                    return_date: Some("2024-01-20".to_string()),
                    ..command(second, "2024-01-02")
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated, fixture.loans.get_loan(loan.id).await.unwrap());
        assert_eq!(updated.book_id, second);
        assert!(fixture.books.is_book_loaned(first).await.unwrap());
        assert!(!fixture.books.is_book_loaned(second).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_loan_is_not_found() {
        let fixture = setup_test().await;
        let result = fixture.loans.update_loan(3, Ok(command(1, "2024-01-01"))).await;
        assert!(matches!(result, Err(LibraryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_loan_is_not_found() {
        let fixture = setup_test().await;
        assert!(matches!(fixture.loans.delete_loan(8).await, Err(LibraryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_loan_whose_book_was_removed_keeps_loan() {
        let fixture = setup_test().await;
        let book_id = create_book(&fixture).await;
        let loan = fixture.loans.create_loan(command(book_id, "2024-01-01")).await.unwrap();
        fixture.books.delete_book(book_id).await.unwrap();

        let result = fixture.loans.delete_loan(loan.id).await;

        match result {
            Err(LibraryError::NotFound(message)) => assert_eq!(message, "Book not found for the loan"),
            other => panic!("expected NotFound, got {:?}", other),
        }
        assert!(fixture.loans.get_loan(loan.id).await.is_ok());
    }
}
