//! Translation of domain errors and request rejections into HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::domain::LibraryError;
use shared::MessageResponse;

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LibraryError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            LibraryError::DateParse { .. } => (StatusCode::BAD_REQUEST, self.to_string()),
            LibraryError::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            LibraryError::Storage(e) => {
                error!(error.cause_chain = ?e, "Unexpected storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

/// Unwrap a JSON body, reporting any rejection as `400 Invalid data`
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, LibraryError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        warn!("Rejected request body: {}", rejection.body_text());
        LibraryError::invalid_data()
    })
}

/// Unwrap a query string, reporting any rejection as `400 Invalid data`
pub fn query_params<T>(
    query: Result<axum::extract::Query<T>, QueryRejection>,
) -> Result<T, LibraryError> {
    query.map(|axum::extract::Query(value)| value).map_err(|rejection| {
        warn!("Rejected query string: {}", rejection.body_text());
        LibraryError::invalid_data()
    })
}
