use super::super::dto::ToolListResponse;
use super::super::state::ServerState;
use crate::model::ModelProvider;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use tracing::debug;

#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    responses(
        (status = 200, description = "Registered tools in registration order", body = ToolListResponse)
    )
)]
pub async fn tools_handler<P: ModelProvider>(
    State(state): State<Arc<ServerState<P>>>,
) -> Json<ToolListResponse> {
    let agent = state.agent();
    let tools: Vec<_> = agent.tools().list().iter().map(|tool| tool.info()).collect();
    debug!(tool_count = tools.len(), "Serving /tools request");
    Json(ToolListResponse { tools })
}
