//! HTTP Handlers

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use agent_core::{AgentError, FailureKind, InvocationRequest, ToolDescriptor};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store_available: bool,
    pub ollama_connected: bool,
}

#[derive(Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// A single-turn question. No history is kept between requests.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    fn new(status: StatusCode, error: impl Into<String>, code: &str) -> Response {
        (
            status,
            Json(Self {
                error: error.into(),
                code: code.into(),
            }),
        )
            .into_response()
    }
}

const fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::UnknownTool => StatusCode::NOT_FOUND,
        FailureKind::SchemaViolation => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_available = state.store.health_check().await;
    let ollama_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: if store_available { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store_available,
        ollama_connected,
    })
}

/// Advertised tool descriptors, in registration order
pub async fn list_tools(State(state): State<AppState>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.gateway.descriptors(),
    })
}

/// Direct gateway invocation
///
/// Outcomes (including "no records") are 200. Failures carry their kind in
/// the status code and the structured failure as the body.
pub async fn invoke_tool(
    State(state): State<AppState>,
    payload: Result<Json<InvocationRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return ErrorResponse::new(rejection.status(), rejection.body_text(), "INVALID_REQUEST");
        }
    };

    match state.gateway.invoke(&request).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(failure) => (failure_status(failure.kind), Json(failure)).into_response(),
    }
}

/// One agent turn over a fresh conversation; every request is single-turn
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, Response> {
    let response = state.agent.ask(&payload.message).await.map_err(|e| {
        tracing::error!("Agent error: {}", e);
        let status = match e {
            AgentError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ErrorResponse::new(status, e.user_message(), "AGENT_ERROR")
    })?;

    Ok(Json(ChatResponse {
        message: response,
        model: state.agent.config().generation.model.clone(),
    }))
}
