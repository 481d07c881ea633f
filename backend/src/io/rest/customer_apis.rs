//! # REST API for Customer Management
//!
//! Endpoints under `/customers`.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::info;

use crate::io::rest::{
    error::{json_body, query_params},
    mappers::CustomerMapper,
};
use crate::AppState;
use shared::{
    CustomerRequest, CustomerResponse, CustomerSearchQuery, HasActiveLoansResponse, MessageResponse,
};

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match json_body(body) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    info!("POST /customers - request: {:?}", request);

    match state
        .customer_service
        .create_customer(CustomerMapper::to_command(request))
        .await
    {
        Ok(customer) => (
            StatusCode::CREATED,
            Json(CustomerResponse {
                message: "Customer created successfully".to_string(),
                customer: CustomerMapper::to_dto(customer),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /customers
pub async fn list_customers(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /customers");

    match state.customer_service.list_customers().await {
        Ok(customers) => (StatusCode::OK, Json(CustomerMapper::to_dto_list(customers))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /customers/{}", customer_id);

    match state.customer_service.get_customer(customer_id).await {
        Ok(customer) => (StatusCode::OK, Json(CustomerMapper::to_dto(customer))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /customers/active-loans
pub async fn list_customers_with_active_loans(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /customers/active-loans");

    match state.customer_service.list_customers_with_active_loans().await {
        Ok(customers) => (StatusCode::OK, Json(CustomerMapper::to_dto_list(customers))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /customers/{id}/has-active-loans
pub async fn has_active_loans(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("GET /customers/{}/has-active-loans", customer_id);

    match state.customer_service.has_active_loans(customer_id).await {
        Ok(has_active_loans) => {
            (StatusCode::OK, Json(HasActiveLoansResponse { has_active_loans })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// GET /customers/search?name=
pub async fn search_customers(
    State(state): State<AppState>,
    query: Result<Query<CustomerSearchQuery>, QueryRejection>,
) -> impl IntoResponse {
    let query = match query_params(query) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };
    info!("GET /customers/search - query: {:?}", query);

    match state
        .customer_service
        .search_customers(CustomerMapper::to_search_command(query))
        .await
    {
        Ok(customers) => (StatusCode::OK, Json(CustomerMapper::to_dto_list(customers))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// PUT /customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
    body: Result<Json<CustomerRequest>, JsonRejection>,
) -> impl IntoResponse {
    info!("PUT /customers/{}", customer_id);

    let command = json_body(body).map(CustomerMapper::to_command);

    match state
        .customer_service
        .update_customer(customer_id, command)
        .await
    {
        Ok(customer) => (
            StatusCode::OK,
            Json(CustomerResponse {
                message: "Customer updated successfully".to_string(),
                customer: CustomerMapper::to_dto(customer),
            }),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i64>,
) -> impl IntoResponse {
    info!("DELETE /customers/{}", customer_id);

    match state.customer_service.delete_customer(customer_id).await {
        Ok(()) => {
            (StatusCode::OK, Json(MessageResponse::new("Customer deleted successfully"))).into_response()
        }
        Err(e) => e.into_response(),
    }
}
