//! # Storage Traits
//!
//! The persistence interface the entity managers depend on. Each trait covers
//! one record type; `Connection` hands out repositories so a service never
//! needs to know which backend it is talking to.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::{
    book::{Availability, Book, BookDraft},
    customer::{Customer, CustomerDraft},
    loan::{Loan, LoanDraft},
};

#[async_trait]
pub trait BookStorage: Send + Sync {
    /// Insert a new book with `is_loaned = false` and return it with its id
    async fn store_book(&self, draft: &BookDraft) -> Result<Book>;

    async fn get_book(&self, book_id: i64) -> Result<Option<Book>>;

    /// List all books ordered by id
    async fn list_books(&self) -> Result<Vec<Book>>;

    /// List books on one side of the availability flag, ordered by id
    async fn list_books_by_availability(&self, availability: Availability) -> Result<Vec<Book>>;

    /// Replace the descriptive fields of a book, leaving `is_loaned` untouched.
    /// Returns false if no book has that id.
    async fn update_book(&self, book_id: i64, draft: &BookDraft) -> Result<bool>;

    /// Returns false if no book has that id
    async fn delete_book(&self, book_id: i64) -> Result<bool>;
}

#[async_trait]
pub trait CustomerStorage: Send + Sync {
    async fn store_customer(&self, draft: &CustomerDraft) -> Result<Customer>;

    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>>;

    /// List all customers ordered by id
    async fn list_customers(&self) -> Result<Vec<Customer>>;

    /// Case-insensitive substring match over customer names
    async fn search_customers_by_name(&self, fragment: &str) -> Result<Vec<Customer>>;

    /// Distinct customers referenced by at least one loan that has a return date
    async fn list_customers_with_returned_loans(&self) -> Result<Vec<Customer>>;

    /// Returns false if no customer has that id
    async fn update_customer(&self, customer_id: i64, draft: &CustomerDraft) -> Result<bool>;

    /// Returns false if no customer has that id
    async fn delete_customer(&self, customer_id: i64) -> Result<bool>;
}

#[async_trait]
pub trait LoanStorage: Send + Sync {
    /// Insert a loan and mark its book as loaned, atomically.
    /// Returns None and writes nothing if the book does not exist.
    async fn open_loan(&self, draft: &LoanDraft) -> Result<Option<Loan>>;

    async fn get_loan(&self, loan_id: i64) -> Result<Option<Loan>>;

    /// List all loans ordered by id
    async fn list_loans(&self) -> Result<Vec<Loan>>;

    async fn list_loans_by_book(&self, book_id: i64) -> Result<Vec<Loan>>;

    async fn list_loans_by_customer(&self, customer_id: i64) -> Result<Vec<Loan>>;

    /// Count a customer's loans that have a return date
    async fn count_returned_loans_for_customer(&self, customer_id: i64) -> Result<i64>;

    /// Replace every field of a loan. Book availability is not touched.
    /// Returns false if no loan has that id.
    async fn update_loan(&self, loan_id: i64, draft: &LoanDraft) -> Result<bool>;

    /// Mark the book as available and delete the loan, atomically.
    /// Returns false and writes nothing if either row is missing.
    async fn close_loan(&self, loan_id: i64, book_id: i64) -> Result<bool>;
}

/// Trait defining the interface for storage connections
///
/// Provides factory methods for creating repositories so the domain layer can
/// work with any storage backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone + 'static {
    type BookRepository: BookStorage + Clone;
    type CustomerRepository: CustomerStorage + Clone;
    type LoanRepository: LoanStorage + Clone;

    fn create_book_repository(&self) -> Self::BookRepository;

    fn create_customer_repository(&self) -> Self::CustomerRepository;

    fn create_loan_repository(&self) -> Self::LoanRepository;
}
