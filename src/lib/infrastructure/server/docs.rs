use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HistoryResponse, ToolListResponse};
use super::routes;
use crate::agent::{AgentStep, StepOutcome, TurnStatus};
use crate::tooling::ToolInfo;
use crate::types::{ChatMessage, HistoryEntry, MessageRole};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::chat::chat_handler,
        routes::tools::tools_handler,
        routes::sessions::history_handler,
        routes::sessions::close_handler
    ),
    components(
        schemas(
            ChatRequest,
            ChatResponse,
            ErrorResponse,
            ToolListResponse,
            HistoryResponse,
            AgentStep,
            StepOutcome,
            TurnStatus,
            ToolInfo,
            HistoryEntry,
            ChatMessage,
            MessageRole
        )
    ),
    tags(
        (name = "chat", description = "Ask Alfred about the gala"),
        (name = "tools", description = "Tools Alfred can use"),
        (name = "sessions", description = "Conversation history")
    )
)]
pub struct ApiDoc;
