//! # REST API for Loan Management
//!
//! Endpoints under `/loans`. Creating and deleting a loan also flips the
//! referenced book's `is_loaned` flag; see [`crate::domain::LoanService`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::io::rest::{error::json_body, mappers::LoanMapper};
use crate::AppState;
use shared::{LoanRequest, LoanResponse, MessageResponse};

/// POST /loans
pub async fn create_loan(
    State(state): State<AppState>,
    body: Result<Json<LoanRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(body) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    info!("POST /loans - request: {:?}", request);

    match state.loan_service.create_loan(LoanMapper::to_command(request)).await {
        Ok(loan) => (
            StatusCode::CREATED,
            Json(LoanResponse {
                message: "Loan created successfully".to_string(),
                loan: LoanMapper::to_dto(loan),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /loans
pub async fn list_loans(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /loans");

    match state.loan_service.list_loans().await {
        Ok(loans) => (StatusCode::OK, Json(LoanMapper::to_dto_list(loans))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /loans/{id}
pub async fn get_loan(State(state): State<AppState>, Path(loan_id): Path<i64>) -> impl IntoResponse {
    info!("GET /loans/{}", loan_id);

    match state.loan_service.get_loan(loan_id).await {
        Ok(loan) => (StatusCode::OK, Json(LoanMapper::to_dto(loan))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /loans/book/{book_id}
pub async fn list_loans_by_book(
    State(state): State<AppState>,
    Path(book_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /loans/book/{}", book_id);

    match state.loan_service.list_loans_by_book(book_id).await {
        Ok(loans) => (StatusCode::OK, Json(LoanMapper::to_dto_list(loans))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /loans/customer/{customer_id}
pub async fn list_loans_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /loans/customer/{}", customer_id);

    match state.loan_service.list_loans_by_customer(customer_id).await {
        Ok(loans) => (StatusCode::OK, Json(LoanMapper::to_dto_list(loans))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /loans/{id}
pub async fn update_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>,
    body: Result<Json<LoanRequest>, JsonRejection>,
) -> impl IntoResponse {
    info!("PUT /loans/{}", loan_id);

    let command = json_body(body).map(LoanMapper::to_command);

    match state
        .loan_service
        .update_loan(loan_id, command)
        .await
    {
        Ok(loan) => (
            StatusCode::OK,
            Json(LoanResponse {
                message: "Loan updated successfully".to_string(),
                loan: LoanMapper::to_dto(loan),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /loans/{id}
pub async fn delete_loan(
    State(state): State<AppState>,
    Path(loan_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /loans/{}", loan_id);

    match state.loan_service.delete_loan(loan_id).await {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new("Loan deleted successfully"))).into_response(),
        Err(e) => e.into_response(),
    }
}
