use super::docs::ApiDoc;
use super::error::ServerError;
use super::routes;
use super::state::ServerState;
use crate::agent::Agent;
use crate::application::session::SessionOptions;
use crate::model::ModelProvider;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;

/// All REST routes with permissive CORS. At most `max_sessions` sessions stay open.
pub fn build_router<P>(
    agent: Arc<Agent<P>>,
    session_options: SessionOptions,
    max_sessions: usize,
) -> Router
where
    P: ModelProvider + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = Arc::new(ServerState::new(agent, session_options, max_sessions));
    Router::new()
        .route("/api-doc/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .route("/chat", post(routes::chat::chat_handler::<P>))
        .route("/tools", get(routes::tools::tools_handler::<P>))
        .route(
            "/sessions/{id}",
            delete(routes::sessions::close_handler::<P>),
        )
        .route(
            "/sessions/{id}/history",
            get(routes::sessions::history_handler::<P>),
        )
        .layer(cors)
        .with_state(state)
}

pub(super) async fn serve<P>(
    agent: Arc<Agent<P>>,
    session_options: SessionOptions,
    addr: SocketAddr,
    max_sessions: usize,
) -> Result<(), ServerError>
where
    P: ModelProvider + 'static,
{
    let app = build_router(agent, session_options, max_sessions);
    info!(%addr, "Binding REST server");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, "REST server ready to accept connections");

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(ServerError::Serve)
}
