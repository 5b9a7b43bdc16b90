//! # corporate-server
//!
//! Process surfaces for the corporate data assistant. Three binaries share
//! the same bootstrap:
//!
//! | Binary             | Surface                                         |
//! |--------------------|-------------------------------------------------|
//! | `corporate-server` | HTTP API (chat, tool listing, direct invoke)    |
//! | `corporate-cli`    | Interactive `You:` / `Assistant:` loop          |
//! | `corporate-tools`  | JSON-lines tool server over stdin/stdout        |

pub mod bootstrap;
pub mod config;
pub mod handlers;
pub mod state;
pub mod stdio;
pub mod telemetry;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::{AssistantConfig, ConfigError};
pub use state::AppState;

use crate::handlers::{chat_handler, health_check, invoke_tool, list_tools};

/// Build the HTTP router over `state`
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        // Gateway
        .route("/api/tools/invoke", post(invoke_tool))
        // Agent API
        .route("/api/chat", post(chat_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
