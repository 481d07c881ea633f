//! # REST API for Book Management
//!
//! Endpoints under `/books`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::io::rest::{error::json_body, mappers::BookMapper};
use crate::AppState;
use shared::{BookRequest, BookResponse, IsLoanedResponse, MessageResponse};

/// POST /books
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(body) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    info!("POST /books - request: {:?}", request);

    match state.book_service.create_book(BookMapper::to_command(request)).await {
        Ok(book) => (
            StatusCode::CREATED,
            Json(BookResponse {
                message: "Book created successfully".to_string(),
                book: BookMapper::to_dto(book),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /books
pub async fn list_books(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /books");

    match state.book_service.list_books().await {
        Ok(books) => (StatusCode::OK, Json(BookMapper::to_dto_list(books))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /books/{id}
pub async fn get_book(State(state): State<AppState>, Path(book_id): Path<i64>) -> impl IntoResponse {
    info!("GET /books/{}", book_id);

    match state.book_service.get_book(book_id).await {
        Ok(book) => (StatusCode::OK, Json(BookMapper::to_dto(book))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /books/available
pub async fn list_available_books(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /books/available");

    match state.book_service.list_available_books().await {
        Ok(books) => (StatusCode::OK, Json(BookMapper::to_dto_list(books))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /books/loaned
pub async fn list_loaned_books(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /books/loaned");

    match state.book_service.list_loaned_books().await {
        Ok(books) => (StatusCode::OK, Json(BookMapper::to_dto_list(books))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /books/{id}/is-loaned
pub async fn is_book_loaned(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /books/{}/is-loaned", book_id);

    match state.book_service.is_book_loaned(book_id).await {
        Ok(is_loaned) => (StatusCode::OK, Json(IsLoanedResponse { is_loaned })).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
    body: Result<Json<BookRequest>, JsonRejection>,
) -> impl IntoResponse {
    info!("PUT /books/{}", book_id);

    // Body errors surface only once the book is known to exist
    let command = json_body(body).map(BookMapper::to_command);

    match state
        .book_service
        .update_book(book_id, command)
        .await
    {
        Ok(book) => (
            StatusCode::OK,
            Json(BookResponse {
                message: "Book updated successfully".to_string(),
                book: BookMapper::to_dto(book),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /books/{}", book_id);

    match state.book_service.delete_book(book_id).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Book deleted successfully"))).into_response(),
        Err(e) => e.into_response(),
    }
}
