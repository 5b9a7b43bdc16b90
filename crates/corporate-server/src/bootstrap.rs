//! Explicit construction of the process dependencies
//!
//! Order matters: the store is seeded before any tool is registered, and
//! the registry is frozen before the gateway takes it.

use std::sync::Arc;

use agent_core::{Agent, AgentBuilder, InvocationGateway, LlmProvider, Result};
use agent_runtime::OllamaProvider;
use corporate_data::{CORPORATE_ASSISTANT_PROMPT, CorporateStore, SqliteStore, build_registry};

use crate::config::AssistantConfig;
use crate::state::AppState;

/// Seed the store and put the gateway in front of it
pub async fn gateway(
    config: &AssistantConfig,
) -> Result<(Arc<dyn CorporateStore>, Arc<InvocationGateway>)> {
    let store: Arc<dyn CorporateStore> = Arc::new(SqliteStore::initialize(&config.store).await?);

    let registry = build_registry(Arc::clone(&store))?;
    tracing::info!("Registered {} tools:", registry.len());
    for name in registry.names() {
        tracing::info!("  • {}", name);
    }

    let gateway = Arc::new(InvocationGateway::new(
        Arc::new(registry),
        config.gateway.clone(),
    ));
    Ok((store, gateway))
}

/// Agent driver over an existing gateway
pub fn agent(
    config: &AssistantConfig,
    provider: Arc<dyn LlmProvider>,
    gateway: Arc<InvocationGateway>,
) -> Result<Agent> {
    AgentBuilder::new()
        .provider(provider)
        .gateway(gateway)
        .system_prompt(CORPORATE_ASSISTANT_PROMPT)
        .generation(config.generation.clone())
        .max_iterations(config.max_iterations)
        .build()
}

/// Wire everything the HTTP server and the CLI need
pub async fn app_state(config: &AssistantConfig) -> Result<AppState> {
    let (store, gateway) = gateway(config).await?;

    let provider: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::new(&config.ollama));
    match provider.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to {}", provider.name());
            if let Ok(models) = provider.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ {} not available - chat will fail until it is", provider.name());
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    let agent = agent(config, Arc::clone(&provider), Arc::clone(&gateway))?;

    Ok(AppState {
        store,
        gateway,
        provider,
        agent: Arc::new(agent),
    })
}
