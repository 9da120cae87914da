//! HTTP API server

use crate::engine::EngineHandle;
use crate::error::LexiconError;
use crate::resolver::Resolution;
use crate::types::{Dictionary, LexiconStats};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiServerConfig {
    /// Server address
    pub addr: SocketAddr,
}

impl Default for ApiServerConfig {
    fn default() -> Self {
        Self {
            addr: ([127, 0, 0, 1], 3000).into(),
        }
    }
}

/// API server
pub struct ApiServer {
    config: ApiServerConfig,
    engine: EngineHandle,
}

impl ApiServer {
    pub fn new(config: ApiServerConfig, engine: EngineHandle) -> Self {
        Self { config, engine }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    /// Bind the configured address and serve until the process exits
    pub async fn serve(self) -> anyhow::Result<()> {
        let router = build_router(self.engine);
        let listener = tokio::net::TcpListener::bind(self.config.addr).await?;
        info!("API server listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// Build router
pub fn build_router(engine: EngineHandle) -> Router {
    Router::new()
        .route("/api/resolve", post(resolve_handler))
        .route("/api/random-word", get(random_word_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/dictionaries", get(list_dictionaries_handler))
        .route("/api/dictionaries/:name", put(register_dictionary_handler))
        .route("/api/cache", delete(clear_cache_handler))
        // Health check
        .route("/health", get(health_handler))
        .with_state(engine)
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<LexiconError> for ApiError {
    fn from(err: LexiconError) -> Self {
        match err {
            LexiconError::InvalidDocument(_)
            | LexiconError::InvalidSource(_)
            | LexiconError::Serialization(_) => Self::bad_request(err.to_string()),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ResolveRequest {
    query: String,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resolution: Option<Resolution>,
}

/// Resolve a chat query
async fn resolve_handler(
    State(engine): State<EngineHandle>,
    Json(req): Json<ResolveRequest>,
) -> Json<ResolveResponse> {
    let resolution = engine.resolve_detailed(&req.query);
    Json(ResolveResponse {
        response: resolution.as_ref().and_then(Resolution::response),
        resolution,
    })
}

#[derive(Debug, Serialize)]
struct RandomWordResponse {
    word: String,
}

async fn random_word_handler(State(engine): State<EngineHandle>) -> Json<RandomWordResponse> {
    Json(RandomWordResponse {
        word: engine.random_word(),
    })
}

async fn stats_handler(State(engine): State<EngineHandle>) -> Json<LexiconStats> {
    Json(engine.stats())
}

async fn list_dictionaries_handler(State(engine): State<EngineHandle>) -> Json<Vec<String>> {
    Json(engine.list_dictionaries())
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    name: String,
    translations: usize,
    vocabulary: usize,
    conversations: usize,
}

/// Register or replace a dictionary from a JSON document
async fn register_dictionary_handler(
    State(engine): State<EngineHandle>,
    Path(name): Path<String>,
    Json(document): Json<serde_json::Value>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::bad_request("dictionary name must not be empty"));
    }

    let dictionary = Dictionary::from_value(document)?;
    let response = RegisterResponse {
        name: name.clone(),
        translations: dictionary.translation_count(),
        vocabulary: dictionary.vocabulary_count(),
        conversations: dictionary.conversation_count(),
    };

    debug!(dictionary = %name, "Registering dictionary over HTTP");
    engine.register(name, dictionary);
    Ok(Json(response))
}

async fn clear_cache_handler(State(engine): State<EngineHandle>) -> StatusCode {
    engine.clear_cache();
    StatusCode::NO_CONTENT
}

/// Health check handler
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    dictionaries: usize,
}

async fn health_handler(State(engine): State<EngineHandle>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dictionaries: engine.stats().dictionary_count,
    })
}
