//! Reasoning Loop
//!
//! ReAct (Reason + Act) agent driver. The model decides; every data access
//! goes through the [`InvocationGateway`], one call at a time.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::gateway::{InvocationGateway, render};
use crate::message::{Conversation, Message, ToolMessageMeta};
use crate::provider::{GenerationOptions, LlmProvider};
use crate::tool::InvocationRequest;

/// Agent configuration
#[derive(Clone, Debug)]
pub struct AgentConfig {
    /// System prompt template
    pub system_prompt: String,

    /// Maximum reasoning iterations before giving up
    pub max_iterations: usize,

    /// Generation options
    pub generation: GenerationOptions,

    /// Whether to append tool descriptions to system prompt
    pub inject_tool_descriptions: bool,

    /// Context budget for the conversation, in estimated tokens
    pub max_context_tokens: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            max_iterations: 6,
            generation: GenerationOptions::default(),
            inject_tool_descriptions: true,
            max_context_tokens: 8192,
        }
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = r#"You are a helpful AI assistant.

When you need to use a tool, respond with a JSON block in this exact format:
```tool
{"tool": "tool_name", "arguments": {"arg1": "value1"}}
```

After receiving tool results, synthesize them into a helpful response.
If you can answer directly without tools, do so.
Be concise and accurate."#;

const FAILURE_NOTICE: &str = "State plainly that the data could not be retrieved. \
Do not estimate, invent or substitute any records.";

/// The main Agent struct
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    gateway: Arc<InvocationGateway>,
    config: AgentConfig,
}

impl Agent {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        gateway: Arc<InvocationGateway>,
        config: AgentConfig,
    ) -> Self {
        Self {
            provider,
            gateway,
            config,
        }
    }

    /// Build the full system prompt including tool descriptions
    pub fn build_system_prompt(&self) -> String {
        let mut prompt = self.config.system_prompt.clone();
        let registry = self.gateway.registry();

        if self.config.inject_tool_descriptions && !registry.is_empty() {
            prompt.push_str("\n\n");
            prompt.push_str(&registry.generate_prompt_section());
        }

        prompt
    }

    /// Start a conversation primed with this agent's system prompt
    pub fn new_conversation(&self) -> Conversation {
        Conversation::with_system_prompt(self.build_system_prompt())
            .with_max_context_tokens(self.config.max_context_tokens)
    }

    /// Run the agent until it produces a final answer
    pub async fn run(&self, conversation: &mut Conversation) -> Result<String> {
        if !conversation.has_system_prompt() {
            conversation
                .messages_mut()
                .insert(0, Message::system(self.build_system_prompt()));
        }

        for iteration in 1..=self.config.max_iterations {
            conversation.truncate_to_fit();

            let completion = self
                .provider
                .complete(conversation.messages(), &self.config.generation)
                .await?;

            let content = completion.content;
            conversation.push(Message::assistant(&content));

            let Some(request) = parse_tool_call(&content) else {
                tracing::debug!(iteration, "Final answer produced");
                return Ok(content);
            };

            tracing::debug!(iteration, tool = %request.name, "Model requested tool");
            let result = self.gateway.invoke(&request).await;

            let failed = result.is_err();
            let mut text = format!(
                "[Tool '{}' {}]\n{}",
                request.name,
                if failed { "failed" } else { "returned" },
                render(&result)
            );
            if failed {
                text.push('\n');
                text.push_str(FAILURE_NOTICE);
            }

            conversation.push(Message::tool(
                text,
                ToolMessageMeta {
                    tool_name: request.name,
                    call_id: request.id,
                    failed,
                },
            ));
        }

        Err(AgentError::MaxIterations(self.config.max_iterations))
    }

    /// Run with a simple string input (creates temporary conversation)
    pub async fn ask(&self, question: &str) -> Result<String> {
        let mut conversation = self.new_conversation();
        conversation.push(Message::user(question));
        self.run(&mut conversation).await
    }

    pub fn gateway(&self) -> &InvocationGateway {
        &self.gateway
    }

    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }
}

/// Extract a tool call from a model response.
///
/// Prefers a fenced ```` ```tool ```` block, then falls back to a bare JSON
/// object carrying a `"tool"` key.
pub fn parse_tool_call(content: &str) -> Option<InvocationRequest> {
    const TOOL_START: &str = "```tool";
    const FENCE: &str = "```";

    if let Some(start_idx) = content.find(TOOL_START) {
        let after_marker = &content[start_idx + TOOL_START.len()..];
        if let Some(end_idx) = after_marker.find(FENCE) {
            let json_str = after_marker[..end_idx].trim();
            if let Ok(call) = serde_json::from_str::<InvocationRequest>(json_str) {
                return Some(with_call_id(call));
            }
        }
    }

    parse_inline_tool_call(content).map(with_call_id)
}

fn parse_inline_tool_call(content: &str) -> Option<InvocationRequest> {
    if !content.contains(r#""tool""#) {
        return None;
    }

    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }

    serde_json::from_str::<InvocationRequest>(&content[start..=end]).ok()
}

fn with_call_id(mut call: InvocationRequest) -> InvocationRequest {
    if call.id.is_none() {
        call.id = Some(uuid::Uuid::new_v4().to_string());
    }
    call
}

/// Builder for Agent configuration
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    gateway: Option<Arc<InvocationGateway>>,
    config: AgentConfig,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            provider: None,
            gateway: None,
            config: AgentConfig::default(),
        }
    }

    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    #[must_use]
    pub fn gateway(mut self, gateway: Arc<InvocationGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = prompt.into();
        self
    }

    #[must_use]
    pub fn generation(mut self, options: GenerationOptions) -> Self {
        self.config.generation = options;
        self
    }

    #[must_use]
    pub fn max_iterations(mut self, max: usize) -> Self {
        self.config.max_iterations = max;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;
        let gateway = self
            .gateway
            .ok_or_else(|| AgentError::Config("Invocation gateway is required".into()))?;

        Ok(Agent::new(provider, gateway, self.config))
    }
}
