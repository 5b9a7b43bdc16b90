//! Interactive terminal chat with the corporate assistant

use std::io::Write;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use agent_core::Message;
use corporate_server::{AssistantConfig, bootstrap, telemetry};

fn prompt() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\nYou: ")?;
    stdout.flush()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init_tracing("warn");

    let config = AssistantConfig::from_env()?;
    let state = bootstrap::app_state(&config)
        .await
        .context("failed to start the corporate assistant")?;
    let agent = state.agent;

    println!("Corporate assistant ready. Type 'exit' or 'quit' to leave.");
    let mut conversation = agent.new_conversation();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };
        let Some(line) = line else { break };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        conversation.push(Message::user(input));
        let reply = tokio::select! {
            reply = agent.run(&mut conversation) => reply,
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
        };

        match reply {
            Ok(answer) => println!("\nAssistant: {answer}"),
            Err(e) => {
                tracing::error!("Agent error: {}", e);
                println!("\nAssistant: {}", e.user_message());
            }
        }
    }

    println!("Goodbye.");
    Ok(())
}
