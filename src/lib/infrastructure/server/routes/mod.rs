pub(super) mod chat;
pub(super) mod sessions;
pub(super) mod tools;

use super::dto::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;

pub(super) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(super) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
