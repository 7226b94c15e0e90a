// Summery HTTP server
//
// Exposes the chat endpoint used by the browser page and a health probe.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use summery_core::providers::{build_article_lookup, build_summarizer};
use summery_core::{ChatRequest, ChatResponse, ChatService, SessionRegistry, SummeryConfig};

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("startup failed: {0}")]
    Startup(#[from] summery_core::SummeryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Clone)]
pub struct AppState {
    pub service: ChatService,
}

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    sessions: usize,
}

/// Wire collaborators from config into a ready chat service
pub fn build_service(config: &SummeryConfig) -> Result<ChatService> {
    let summarizer = build_summarizer(&config.summarizer)?;
    let lookup = build_article_lookup(&config.articles)?;
    let registry = SessionRegistry::new(summarizer, lookup, config.dialogue.clone());
    Ok(ChatService::new(Arc::new(registry)))
}

pub fn router(service: ChatService) -> Router {
    Router::new()
        .route("/get", post(chat_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(AppState { service })
}

/// Bind `addr` and serve until the process stops
pub async fn serve(addr: &str, service: ChatService) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(target: "server", url = %format!("http://{}", addr), "Summery server ready");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn chat_handler(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    Json(state.service.handle(req).await)
}

async fn health_handler(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        sessions: state.service.registry().len(),
    })
}
