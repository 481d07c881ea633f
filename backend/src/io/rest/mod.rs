//! # REST API Interface Layer
//!
//! HTTP endpoints for the library record store. Handlers parse the request,
//! map it to a domain command, call the owning service and translate the
//! result (or [`LibraryError`](crate::domain::LibraryError)) into a response.
//! Every error body has the shape `{"message": "..."}`.

pub mod book_apis;
pub mod customer_apis;
pub mod error;
pub mod loan_apis;
pub mod mappers;
