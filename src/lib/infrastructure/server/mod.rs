mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use docs::ApiDoc;
pub use dto::{ChatRequest, ChatResponse, ErrorResponse, HistoryResponse, ToolListResponse};
pub use error::ServerError;
pub use router::build_router;

use crate::agent::Agent;
use crate::application::session::SessionOptions;
use crate::model::ModelProvider;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn serve<P>(
    agent: Arc<Agent<P>>,
    session_options: SessionOptions,
    addr: SocketAddr,
    max_sessions: usize,
) -> Result<(), ServerError>
where
    P: ModelProvider + 'static,
{
    router::serve(agent, session_options, addr, max_sessions).await
}
