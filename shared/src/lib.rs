//! Wire types for the library record store.
//!
//! Request bodies keep every field optional so that a missing field reaches the
//! server's validation step and is reported as `400 Invalid data` instead of a
//! deserialization failure.

use serde::{Deserialize, Serialize};

/// A book in the catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author: String,
    pub year_published: i32,
    /// Category code
    #[serde(rename = "type")]
    pub book_type: Option<i64>,
    /// True while an open loan references this book
    pub is_loaned: bool,
}

/// A library customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub age: i32,
}

/// A loan of one book to one customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,
    pub customer_id: i64,
    pub book_id: i64,
    /// ISO calendar date (YYYY-MM-DD)
    pub loan_date: String,
    /// ISO calendar date (YYYY-MM-DD), null while the loan is outstanding
    pub return_date: Option<String>,
}

/// Body for POST /books and PUT /books/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookRequest {
    pub name: Option<String>,
    pub author: Option<String>,
    pub year_published: Option<i32>,
    #[serde(rename = "type")]
    pub book_type: Option<i64>,
}

/// Body for POST /customers and PUT /customers/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i32>,
}

/// Body for POST /loans and PUT /loans/{id}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub customer_id: Option<i64>,
    pub book_id: Option<i64>,
    pub loan_date: Option<String>,
    pub return_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub message: String,
    pub customer: Customer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResponse {
    pub message: String,
    pub loan: Loan,
}

/// Plain message body used for deletions and every error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsLoanedResponse {
    pub is_loaned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HasActiveLoansResponse {
    pub has_active_loans: bool,
}

/// Query string for GET /customers/search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSearchQuery {
    pub name: Option<String>,
}
