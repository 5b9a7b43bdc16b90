//! # agent-core
//!
//! Provider-agnostic agent logic with a capability-scoped tool gateway.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                             Agent                                │
//! │  ┌─────────────┐  ┌──────────────────┐  ┌─────────────────────┐  │
//! │  │  Reasoning  │──│ InvocationGateway│  │   LlmProvider       │  │
//! │  │    Loop     │  │  ┌────────────┐  │──│   (Strategy)        │  │
//! │  └─────────────┘  │  │ToolRegistry│  │  └─────────────────────┘  │
//! │                   │  └────────────┘  │                           │
//! │                   └──────────────────┘                           │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The agent never touches data directly. It names a tool and passes
//! arguments; the gateway resolves the name against a fixed registry of
//! read-only tools, validates the arguments against the tool's schema and
//! returns either records, an explicit "no records" message, or a typed
//! failure.

pub mod error;
pub mod gateway;
pub mod message;
pub mod provider;
pub mod reasoning;
pub mod tool;

pub use error::{AgentError, Result};
pub use gateway::{
    FailureKind, GatewayConfig, InvocationFailure, InvocationGateway, InvocationOutcome,
    InvocationResult, render,
};
pub use message::{Conversation, Message, Role};
pub use provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};
pub use reasoning::{Agent, AgentBuilder, AgentConfig};
pub use tool::{
    InvocationRequest, ParamType, ParameterSchema, Tool, ToolDescriptor, ToolOutput,
    ToolRegistry, ValidatedArgs,
};
