//! Invocation Gateway
//!
//! The single dispatch boundary between an agent's decision to call a tool
//! and the data layer:
//!
//! ```text
//! InvocationRequest ─► resolve ─► validate ─► execute (timeout) ─► serialize
//!                        │           │              │
//!                   UnknownTool  SchemaViolation  StoreUnavailable
//! ```
//!
//! The gateway holds no per-call state, so concurrent `invoke` calls from
//! independent sessions need no coordination. It never retries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::AgentError;
use crate::tool::{InvocationRequest, ToolDescriptor, ToolOutput, ToolRegistry};

/// Gateway configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Upper bound on a single dispatch, store round-trip included
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// Failure taxonomy surfaced to the agent driver
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Name not in the registry. Never worth retrying.
    UnknownTool,
    /// Argument missing or mistyped. Fix the call, don't guess.
    SchemaViolation,
    /// Store unreachable, faulted or timed out. Caller may back off and retry.
    StoreUnavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnknownTool => "UnknownTool",
            Self::SchemaViolation => "SchemaViolation",
            Self::StoreUnavailable => "StoreUnavailable",
        })
    }
}

/// Structured failure returned instead of raising
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Offending argument for schema violations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl InvocationFailure {
    fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field: None,
        }
    }
}

impl From<AgentError> for InvocationFailure {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::UnknownTool(name) => Self::new(
                FailureKind::UnknownTool,
                format!("no tool named `{name}` is registered"),
            ),
            AgentError::SchemaViolation { field, reason } => Self {
                kind: FailureKind::SchemaViolation,
                message: format!("invalid argument `{field}`: {reason}"),
                field: Some(field),
            },
            AgentError::StoreUnavailable(msg) => Self::new(FailureKind::StoreUnavailable, msg),
            // Anything else escaping a tool means the data path is broken.
            other => Self::new(FailureKind::StoreUnavailable, other.to_string()),
        }
    }
}

/// Successful dispatch. An empty lookup is a success, not a failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationOutcome {
    /// Non-empty record list, or a structured value such as an aggregate.
    /// `truncated` is set when the result cap cut the list short.
    Found {
        count: usize,
        #[serde(default, skip_serializing_if = "is_false")]
        truncated: bool,
        payload: Value,
    },
    /// The lookup ran and nothing matched
    NoRecords { message: String },
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

pub type InvocationResult = Result<InvocationOutcome, InvocationFailure>;

/// Text appended to the conversation for an invocation result
pub fn render(result: &InvocationResult) -> String {
    match result {
        Ok(InvocationOutcome::Found {
            count,
            truncated,
            payload,
        }) => {
            let text =
                serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string());
            if *truncated {
                format!(
                    "{text}\n(Showing the first {count} matches; more records exist. Narrow the query to see the rest.)"
                )
            } else {
                text
            }
        }
        Ok(InvocationOutcome::NoRecords { message }) => message.clone(),
        Err(failure) => format!("Retrieval failed ({}): {}", failure.kind, failure.message),
    }
}

fn serialize(output: ToolOutput) -> InvocationOutcome {
    match output {
        ToolOutput::Records {
            entity,
            query,
            records,
            ..
        } if records.is_empty() => InvocationOutcome::NoRecords {
            message: format!("No {entity} found matching '{query}'"),
        },
        ToolOutput::Records {
            records, truncated, ..
        } => InvocationOutcome::Found {
            count: records.len(),
            truncated,
            payload: Value::Array(records),
        },
        ToolOutput::Object(value) => InvocationOutcome::Found {
            count: 1,
            truncated: false,
            payload: value,
        },
    }
}

/// Gateway over a fixed [`ToolRegistry`]
#[derive(Clone, Debug)]
pub struct InvocationGateway {
    registry: Arc<ToolRegistry>,
    config: GatewayConfig,
}

impl InvocationGateway {
    pub const fn new(registry: Arc<ToolRegistry>, config: GatewayConfig) -> Self {
        Self { registry, config }
    }

    /// Capability surface advertised to the agent driver
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.registry.list_descriptors()
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Resolve, validate, dispatch and serialize one request
    pub async fn invoke(&self, request: &InvocationRequest) -> InvocationResult {
        let started = Instant::now();
        let result = self.dispatch(request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(InvocationOutcome::Found {
                count, truncated, ..
            }) => {
                tracing::info!(
                    tool = %request.name,
                    count,
                    truncated,
                    elapsed_ms,
                    "Invocation succeeded"
                );
            }
            Ok(InvocationOutcome::NoRecords { .. }) => {
                tracing::info!(tool = %request.name, elapsed_ms, "Invocation found no records");
            }
            Err(failure) => {
                tracing::warn!(
                    tool = %request.name,
                    kind = %failure.kind,
                    elapsed_ms,
                    "Invocation failed: {}",
                    failure.message
                );
            }
        }

        result
    }

    async fn dispatch(&self, request: &InvocationRequest) -> InvocationResult {
        let entry = self.registry.entry(&request.name)?;
        let args = entry.descriptor().validate(&request.arguments)?;
        tracing::debug!(tool = %request.name, arguments = ?args.as_map(), "Dispatching");

        let output = tokio::time::timeout(self.config.timeout, entry.execute(&args))
            .await
            .map_err(|_| {
                InvocationFailure::new(
                    FailureKind::StoreUnavailable,
                    format!("timed out after {} ms", self.config.timeout.as_millis()),
                )
            })??;

        Ok(serialize(output))
    }
}
