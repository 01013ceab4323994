use axum::{http::StatusCode, Json};

use crate::models::common::ErrorResponse;

pub mod auth;
pub mod car;
pub mod car_ws;
pub mod donor;
pub mod map;
pub mod product;
pub mod search;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

pub fn db_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!(error = %e, "Database error");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Database error: {}", e),
    )
}
