//! Application State

use std::sync::Arc;

use agent_core::{Agent, InvocationGateway, LlmProvider};
use corporate_data::CorporateStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only corporate store, for health reporting
    pub store: Arc<dyn CorporateStore>,

    /// The only path from a request to the store
    pub gateway: Arc<InvocationGateway>,

    /// LLM provider (Ollama, etc.)
    pub provider: Arc<dyn LlmProvider>,

    /// Agent driver wired to `gateway` and `provider`
    pub agent: Arc<Agent>,
}
