//! # Library Backend
//!
//! A library-management record store: books, customers and the loans that
//! connect them, exposed over a JSON REST API.
//!
//! ## Architecture
//!
//! ```text
//! HTTP client
//!     ↓
//! IO Layer (axum handlers, DTO mappers, error translation)
//!     ↓
//! Domain Layer (BookService, CustomerService, LoanService)
//!     ↓
//! Storage Layer (storage traits, SQLite repositories)
//! ```
//!
//! Only the loan manager has cross-entity effects: opening a loan marks its
//! book as loaned and deleting the loan marks it available again.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    http::Method,
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::ServerConfig;
use crate::domain::{BookService, CustomerService, LoanService};
use crate::io::rest::{book_apis, customer_apis, loan_apis};
use crate::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub book_service: BookService<DbConnection>,
    pub customer_service: CustomerService<DbConnection>,
    pub loan_service: LoanService<DbConnection>,
}

impl AppState {
    pub fn new(db: DbConnection) -> Self {
        let db = Arc::new(db);
        Self {
            book_service: BookService::new(db.clone()),
            customer_service: CustomerService::new(db.clone()),
            loan_service: LoanService::new(db),
        }
    }
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db = DbConnection::new(&config.database_url).await?;

    info!("Setting up application state");
    Ok(AppState::new(db))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &ServerConfig) -> Router {
    let allowed_origins = if config.cors_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(config.cors_origins.clone())
    };
    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/books", get(book_apis::list_books).post(book_apis::create_book))
        .route("/books/available", get(book_apis::list_available_books))
        .route("/books/loaned", get(book_apis::list_loaned_books))
        .route(
            "/books/:id",
            get(book_apis::get_book)
                .put(book_apis::update_book)
                .delete(book_apis::delete_book),
        )
        .route("/books/:id/is-loaned", get(book_apis::is_book_loaned))
        .route(
            "/customers",
            get(customer_apis::list_customers).post(customer_apis::create_customer),
        )
        .route(
            "/customers/active-loans",
            get(customer_apis::list_customers_with_active_loans),
        )
        .route("/customers/search", get(customer_apis::search_customers))
        .route(
            "/customers/:id",
            get(customer_apis::get_customer)
                .put(customer_apis::update_customer)
                .delete(customer_apis::delete_customer),
        )
        .route(
            "/customers/:id/has-active-loans",
            get(customer_apis::has_active_loans),
        )
        .route("/loans", get(loan_apis::list_loans).post(loan_apis::create_loan))
        .route(
            "/loans/:id",
            get(loan_apis::get_loan)
                .put(loan_apis::update_loan)
                .delete(loan_apis::delete_loan),
        )
        .route("/loans/book/:book_id", get(loan_apis::list_loans_by_book))
        .route(
            "/loans/customer/:customer_id",
            get(loan_apis::list_loans_by_customer),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
