//! Tool System
//!
//! Capability-scoped tool framework. Every tool publishes a [`ToolDescriptor`]
//! whose argument schema is checked before the tool ever runs, and the
//! [`ToolRegistry`] only admits tools that declare themselves read-only.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use crate::error::{AgentError, Result};

/// Tool invocation request, as decided by the agent driver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InvocationRequest {
    /// Tool identifier
    #[serde(alias = "tool")]
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: Map<String, Value>,

    /// Optional call ID for tracking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl InvocationRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Map::new(),
            id: None,
        }
    }

    /// Add a single argument
    #[must_use]
    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// JSON type accepted for a parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
}

impl ParamType {
    /// Whether `value` has this JSON type. No coercion is attempted.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// Expected JSON type
    #[serde(rename = "type")]
    pub param_type: ParamType,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,
}

impl ParameterSchema {
    /// A required string parameter, the shape every lookup tool uses
    pub fn required_string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::String,
            description: description.into(),
            required: true,
        }
    }
}

/// Static description of one callable operation, advertised to the agent driver
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description (shown to LLM)
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,

    /// Category for grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Side-effect classification
    pub read_only: bool,
}

impl ToolDescriptor {
    /// Check `arguments` against the declared parameters.
    ///
    /// Rejects missing or `null` required arguments, wrongly typed values and
    /// arguments the schema does not declare. Optional arguments may be absent.
    pub fn validate(&self, arguments: &Map<String, Value>) -> Result<ValidatedArgs> {
        if let Some(extra) = arguments
            .keys()
            .find(|key| !self.parameters.iter().any(|p| &p.name == *key))
        {
            return Err(AgentError::schema(
                extra.clone(),
                format!("`{}` does not accept this argument", self.name),
            ));
        }

        for param in &self.parameters {
            match arguments.get(&param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(AgentError::schema(
                        &param.name,
                        "missing required argument",
                    ));
                }
                None | Some(Value::Null) => {}
                Some(value) if !param.param_type.accepts(value) => {
                    return Err(AgentError::schema(
                        &param.name,
                        format!(
                            "expected {}, got {}",
                            param.param_type,
                            json_type_name(value)
                        ),
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(ValidatedArgs(arguments.clone()))
    }
}

/// Arguments that passed [`ToolDescriptor::validate`]
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    /// Decode into the tool's typed argument record
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone()))
            .map_err(|e| AgentError::schema("arguments", e.to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// What a tool hands back to the gateway
#[derive(Clone, Debug, PartialEq)]
pub enum ToolOutput {
    /// Matching records for a lookup. `entity` is the plural noun used when
    /// nothing matched ("employees", "documents").
    Records {
        entity: String,
        query: String,
        records: Vec<Value>,
        /// The store held more matches than `records` carries
        truncated: bool,
    },

    /// A single structured value, e.g. an aggregate
    Object(Value),
}

impl ToolOutput {
    /// Serialize typed records, keeping each record's field order
    pub fn records<T: Serialize>(
        entity: impl Into<String>,
        query: impl Into<String>,
        records: &[T],
        truncated: bool,
    ) -> Result<Self> {
        let records = records
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::Records {
            entity: entity.into(),
            query: query.into(),
            records,
            truncated,
        })
    }
}

/// Tool trait - implement to add new capabilities
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static descriptor; captured once at registration
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute with arguments already checked against the descriptor
    async fn execute(&self, args: &ValidatedArgs) -> Result<ToolOutput>;
}

/// A tool together with the descriptor captured when it was registered
#[derive(Clone)]
pub struct RegisteredTool {
    descriptor: ToolDescriptor,
    tool: Arc<dyn Tool>,
}

impl RegisteredTool {
    pub const fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    pub async fn execute(&self, args: &ValidatedArgs) -> Result<ToolOutput> {
        self.tool.execute(args).await
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("name", &self.descriptor.name)
            .finish_non_exhaustive()
    }
}

/// Registry of the fixed set of operations exposed to the agent.
///
/// Built once at startup and shared behind an `Arc`; it is never mutated
/// after that. Listing order is registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new tool.
    ///
    /// Fails on a duplicate name, or when the tool does not declare itself
    /// read-only.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Result<()> {
        self.register_arc(Arc::new(tool))
    }

    /// Register a shared tool
    pub fn register_arc(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let descriptor = tool.descriptor();

        if self.index.contains_key(&descriptor.name) {
            return Err(AgentError::DuplicateTool(descriptor.name));
        }
        if !descriptor.read_only {
            return Err(AgentError::Config(format!(
                "tool `{}` has side effects; only read-only tools may be registered",
                descriptor.name
            )));
        }

        tracing::debug!(tool = %descriptor.name, "Registered tool");
        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool { descriptor, tool });
        Ok(())
    }

    /// Exact, case-sensitive lookup
    pub fn resolve(&self, name: &str) -> Result<&ToolDescriptor> {
        self.entry(name).map(RegisteredTool::descriptor)
    }

    /// Exact, case-sensitive lookup of the executable entry
    pub fn entry(&self, name: &str) -> Result<&RegisteredTool> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| AgentError::UnknownTool(name.to_owned()))
    }

    /// All descriptors in registration order
    pub fn list_descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor.clone()).collect()
    }

    /// Tool names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name.as_str()).collect()
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Generate system prompt section describing available tools
    pub fn generate_prompt_section(&self) -> String {
        let mut prompt = String::from("## Available Tools\n\n");
        prompt.push_str("You can use the following tools by responding with a JSON block:\n\n");
        prompt.push_str("```tool\n{\"tool\": \"tool_name\", \"arguments\": {\"arg\": \"value\"}}\n```\n\n");

        for tool in &self.tools {
            let d = &tool.descriptor;
            let _ = writeln!(prompt, "### {}", d.name);
            let _ = writeln!(prompt, "{}", d.description);

            if !d.parameters.is_empty() {
                prompt.push_str("**Parameters:**\n");
                for param in &d.parameters {
                    let required = if param.required { " (required)" } else { "" };
                    let _ = writeln!(
                        prompt,
                        "- `{}` ({}){}: {}",
                        param.name, param.param_type, required, param.description
                    );
                }
            }
            prompt.push('\n');
        }

        prompt
    }
}
