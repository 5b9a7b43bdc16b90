//! # agent-runtime
//!
//! Runtime LLM providers for the corporate assistant.
//!
//! ## Providers
//!
//! - **Ollama** (default): Local LLM inference via Ollama
//!
//! ## Usage
//!
//! ```rust,ignore
//! use agent_runtime::ollama::{OllamaConfig, OllamaProvider};
//!
//! let provider = OllamaProvider::new(&OllamaConfig::default());
//! let agent = AgentBuilder::new()
//!     .provider(Arc::new(provider))
//!     .gateway(gateway)
//!     .build()?;
//! ```

#[cfg(feature = "ollama")]
pub mod ollama;

#[cfg(feature = "ollama")]
pub use ollama::{OllamaConfig, OllamaProvider};
