use super::super::dto::{ErrorResponse, HistoryResponse};
use super::super::state::ServerState;
use super::{ApiError, api_error};
use crate::model::ModelProvider;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/sessions/{id}/history",
    tag = "sessions",
    params(("id" = String, Path, description = "Session id returned by /chat")),
    responses(
        (status = 200, description = "Messages in order, greeting first", body = HistoryResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn history_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
    Path(id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session = state
        .find(&id)
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Session '{id}' does not exist.")))?;
    let session = session.lock().await;
    Ok(Json(HistoryResponse {
        session_id: id,
        messages: session.history().to_vec(),
    }))
}

#[utoipa::path(
    delete,
    path = "/sessions/{id}",
    tag = "sessions",
    params(("id" = String, Path, description = "Session id returned by /chat")),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Unknown session", body = ErrorResponse)
    )
)]
pub async fn close_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Session '{id}' does not exist."),
        ))
    }
}
