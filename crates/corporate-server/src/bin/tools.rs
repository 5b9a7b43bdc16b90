//! JSON-lines tool server on stdin/stdout
//!
//! Exposes the gateway without a model in the loop. Logs go to stderr.

use anyhow::Context;
use tokio::io::BufReader;

use corporate_server::{AssistantConfig, bootstrap, stdio, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("info");

    let config = AssistantConfig::from_env()?;
    let (_store, gateway) = bootstrap::gateway(&config)
        .await
        .context("failed to initialize the corporate store")?;

    tracing::info!("Tool server ready on stdin/stdout");
    stdio::serve(&gateway, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;
    Ok(())
}
