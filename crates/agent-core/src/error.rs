//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Tool not found in registry
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with this name is already registered
    #[error("Duplicate tool: {0}")]
    DuplicateTool(String),

    /// Arguments do not match the tool's declared schema
    #[error("Schema violation on `{field}`: {reason}")]
    SchemaViolation { field: String, reason: String },

    /// Backing data store unreachable, faulted, or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Maximum iterations reached in reasoning loop
    #[error("Maximum iterations ({0}) reached")]
    MaxIterations(usize),

    /// Context length exceeded
    #[error("Context length exceeded: {used} tokens (max: {max})")]
    ContextOverflow { used: u32, max: u32 },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Build a schema violation for `field`
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is retryable by the caller.
    ///
    /// Nothing in this crate retries on its own.
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::StoreUnavailable(_) | Self::Io(_)
        )
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider(msg) => format!("The AI service encountered an error: {msg}"),
            Self::ProviderUnavailable(_) => "The AI service is currently unavailable. Please try again.".into(),
            Self::UnknownTool(name) => format!("The tool '{name}' is not available."),
            Self::SchemaViolation { field, reason } => format!("Invalid tool input for '{field}': {reason}"),
            Self::StoreUnavailable(_) => "Data retrieval failed: the corporate data store is unavailable. No results were produced.".into(),
            Self::MaxIterations(_) => "The request took too long to process. Please try a simpler query.".into(),
            Self::ContextOverflow { .. } => "The conversation is too long. Please start a new session.".into(),
            _ => "An unexpected error occurred.".into(),
        }
    }
}
