use super::super::dto::{ChatRequest, ChatResponse, ErrorResponse};
use super::super::state::ServerState;
use super::{ApiError, api_error};
use crate::agent::AgentError;
use crate::application::session::SessionError;
use crate::model::ModelProvider;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Turn finished (answer or apology)", body = ChatResponse),
        (status = 400, description = "Empty question", body = ErrorResponse),
        (status = 404, description = "Unknown session", body = ErrorResponse),
        (status = 502, description = "Language model unavailable", body = ErrorResponse),
        (status = 503, description = "Knowledge base not ready", body = ErrorResponse)
    )
)]
pub async fn chat_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let ChatRequest {
        question,
        session_id,
    } = payload;
    info!(session = session_id.as_deref(), "Received /chat request");

    if question.trim().is_empty() {
        error!("Rejecting /chat request due to empty question");
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            SessionError::EmptyQuestion.user_message(),
        ));
    }

    let session = match session_id.as_deref() {
        Some(id) => state.find(id).await.ok_or_else(|| {
            api_error(StatusCode::NOT_FOUND, format!("Session '{id}' does not exist."))
        })?,
        None => state.create().await,
    };

    let mut session = session.lock().await;
    let session_id = session.id().to_string();
    match session.submit(&question).await {
        Ok(outcome) => {
            info!(
                session_id = session_id.as_str(),
                status = ?outcome.status,
                iterations = outcome.iterations,
                "Chat turn completed"
            );
            Ok(Json(ChatResponse {
                session_id,
                status: outcome.status,
                answer: outcome.answer,
                steps: outcome.steps,
            }))
        }
        Err(err) => {
            error!(session_id = session_id.as_str(), %err, "Chat turn failed");
            let status = match &err {
                SessionError::EmptyQuestion => StatusCode::BAD_REQUEST,
                SessionError::Agent(AgentError::NotInitialized { .. }) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                SessionError::Agent(AgentError::Model(_)) => StatusCode::BAD_GATEWAY,
            };
            Err(api_error(status, err.user_message()))
        }
    }
}
