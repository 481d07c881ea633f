//! # SQLite Storage Module
//!
//! SQLite implementation of the storage traits: connection management, schema
//! setup, and one repository per record type.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{BookRepository, CustomerRepository, LoanRepository};
