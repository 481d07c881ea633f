//! # Domain Module
//!
//! The entity managers of the library record store and the types they work
//! with.
//!
//! - **book_service**: book CRUD and availability listings
//! - **customer_service**: customer CRUD, name search and loan-history queries
//! - **loan_service**: the loan lifecycle, which keeps `Book::is_loaned` in
//!   step with open loans
//!
//! Services are generic over a storage [`Connection`](crate::storage::Connection)
//! and return [`LibraryError`] so the IO layer can map failures to statuses.

pub mod book_service;
pub mod commands;
pub mod customer_service;
pub mod errors;
pub mod loan_service;
pub mod models;
pub mod validation;

pub use book_service::BookService;
pub use customer_service::CustomerService;
pub use errors::{LibraryError, LibraryResult};
pub use loan_service::LoanService;
