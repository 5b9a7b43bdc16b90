//! JSON-lines tool server
//!
//! One request per input line, one reply per output line:
//!
//! ```text
//! → {"method": "list_tools"}
//! ← {"tools": [...]}
//! → {"method": "call_tool", "name": "query_employees", "arguments": {"query": "Sales"}}
//! ← {"result": {"status": "found", "count": 1, "payload": [...]}}
//! ```
//!
//! Failures come back as `{"error": {...}}` on the same line discipline; the
//! loop only stops at end of input.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use agent_core::{InvocationGateway, InvocationRequest};

#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
enum StdioRequest {
    ListTools,
    CallTool {
        name: String,
        #[serde(default)]
        arguments: Map<String, Value>,
        #[serde(default)]
        id: Option<String>,
    },
}

/// Reply for one request line
pub async fn handle_line(gateway: &InvocationGateway, line: &str) -> Value {
    let request = match serde_json::from_str::<StdioRequest>(line) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!("Malformed request line: {}", e);
            return json!({
                "error": { "kind": "invalid_request", "message": e.to_string() }
            });
        }
    };

    match request {
        StdioRequest::ListTools => json!({ "tools": gateway.descriptors() }),
        StdioRequest::CallTool {
            name,
            arguments,
            id,
        } => {
            let request = InvocationRequest {
                name,
                arguments,
                id,
            };
            match gateway.invoke(&request).await {
                Ok(outcome) => json!({ "result": outcome }),
                Err(failure) => json!({ "error": failure }),
            }
        }
    }
}

/// Serve until `reader` is exhausted
pub async fn serve<R, W>(gateway: &InvocationGateway, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = handle_line(gateway, line).await;
        writer.write_all(reply.to_string().as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    tracing::info!("Input closed, tool server stopping");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seeded_gateway;

    #[tokio::test]
    async fn test_list_tools() {
        let (_dir, gateway) = seeded_gateway().await;

        let reply = handle_line(&gateway, r#"{"method":"list_tools"}"#).await;
        let names: Vec<_> = reply["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["query_employees", "get_department_stats", "search_documents"]
        );
    }

    #[tokio::test]
    async fn test_call_tool() {
        let (_dir, gateway) = seeded_gateway().await;

        let reply = handle_line(
            &gateway,
            r#"{"method":"call_tool","name":"get_department_stats","arguments":{"department":"Sales"}}"#,
        )
        .await;
        assert_eq!(
            reply,
            json!({"result": {"status": "found", "count": 1, "payload": {"department": "Sales", "employee_count": 1}}})
        );
    }

    #[tokio::test]
    async fn failures_are_replies() {
        let (_dir, gateway) = seeded_gateway().await;

        let reply = handle_line(
            &gateway,
            r#"{"method":"call_tool","name":"delete_employee","arguments":{"id":1}}"#,
        )
        .await;
        assert_eq!(reply["error"]["kind"], "unknown_tool");

        let reply = handle_line(&gateway, "not json").await;
        assert_eq!(reply["error"]["kind"], "invalid_request");
    }

    #[tokio::test]
    async fn serves_one_reply_per_line() {
        let (_dir, gateway) = seeded_gateway().await;
        let input = concat!(
            r#"{"method":"list_tools"}"#,
            "\n\n",
            r#"{"method":"call_tool","name":"search_documents","arguments":{"query":"nonexistent"}}"#,
            "\n",
        );

        let mut output = Vec::new();
        serve(&gateway, input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        let replies: Vec<Value> = output
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(
            replies[1],
            json!({"result": {"status": "no_records", "message": "No documents found matching 'nonexistent'"}})
        );
    }
}
