//! Corporate assistant HTTP server

use anyhow::Context;

use corporate_server::{AssistantConfig, bootstrap, router, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();
    telemetry::init_tracing("info,tower_http=debug");

    let config = AssistantConfig::from_env()?;
    let state = bootstrap::app_state(&config)
        .await
        .context("failed to start the corporate assistant")?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 corporate assistant running on http://{}", config.bind_addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health           - Health check");
    tracing::info!("  GET  /api/tools        - List tool descriptors");
    tracing::info!("  POST /api/tools/invoke - Invoke a tool directly");
    tracing::info!("  POST /api/chat         - Ask the assistant");
    tracing::info!("");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutting down");
            }
        })
        .await?;

    Ok(())
}
