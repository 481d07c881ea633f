//! # Storage Module
//!
//! Handles all data persistence for the library record store.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite backend in
//! [`sqlite`] is the one implementation shipped today.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::{BookStorage, Connection, CustomerStorage, LoanStorage};
