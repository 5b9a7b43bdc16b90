//! Process Configuration
//!
//! Everything is read once from the environment (after `.env` is loaded) and
//! handed to constructors by reference. A variable that is set but does not
//! parse is an error, never a silent fallback to the default.

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use agent_core::{GatewayConfig, GenerationOptions};
use agent_runtime::OllamaConfig;
use corporate_data::StoreConfig;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Complete process configuration
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub store: StoreConfig,
    pub gateway: GatewayConfig,
    pub ollama: OllamaConfig,
    pub generation: GenerationOptions,
    pub max_iterations: usize,
    pub bind_addr: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            gateway: GatewayConfig::default(),
            ollama: OllamaConfig::default(),
            generation: GenerationOptions::default(),
            max_iterations: 6,
            bind_addr: "0.0.0.0:3000".into(),
        }
    }
}

impl AssistantConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);
        let defaults = Self::default();

        let store = StoreConfig {
            path: env
                .string("CORPORATE_DB_PATH")
                .map_or(defaults.store.path, PathBuf::from),
            max_results: env.nonzero("CORPORATE_MAX_RESULTS", defaults.store.max_results)?,
            busy_timeout: env.millis("CORPORATE_BUSY_TIMEOUT_MS", defaults.store.busy_timeout)?,
        };

        // a zero timeout fails every dispatch before the store can answer
        let default_timeout_ms =
            u64::try_from(defaults.gateway.timeout.as_millis()).unwrap_or(u64::MAX);
        let gateway = GatewayConfig {
            timeout: Duration::from_millis(env.nonzero("GATEWAY_TIMEOUT_MS", default_timeout_ms)?),
        };

        let ollama = OllamaConfig {
            host: env.string("OLLAMA_HOST").unwrap_or(defaults.ollama.host),
            port: env.parse("OLLAMA_PORT", defaults.ollama.port)?,
            timeout_secs: env.parse("OLLAMA_TIMEOUT_SECS", defaults.ollama.timeout_secs)?,
        };

        let generation = GenerationOptions {
            model: env.string("ASSISTANT_MODEL").unwrap_or(defaults.generation.model),
            temperature: env.parse("ASSISTANT_TEMPERATURE", defaults.generation.temperature)?,
            max_tokens: env.parse("ASSISTANT_MAX_TOKENS", defaults.generation.max_tokens)?,
            top_p: env.parse("ASSISTANT_TOP_P", defaults.generation.top_p)?,
            top_k: env.optional("ASSISTANT_TOP_K")?,
        };

        Ok(Self {
            store,
            gateway,
            ollama,
            generation,
            max_iterations: env.nonzero("ASSISTANT_MAX_ITERATIONS", defaults.max_iterations)?,
            bind_addr: env.string("BIND_ADDR").unwrap_or(defaults.bind_addr),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Set and non-blank
    fn string(&self, var: &str) -> Option<String> {
        (self.0)(var)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    fn optional<T>(&self, var: &'static str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.string(var)
            .map(|value| {
                value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                    var,
                    reason: e.to_string(),
                    value,
                })
            })
            .transpose()
    }

    fn parse<T>(&self, var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        Ok(self.optional(var)?.unwrap_or(default))
    }

    /// Like [`Self::parse`], but zero is an error
    fn nonzero<T>(&self, var: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + Default + PartialEq + Display,
        T::Err: Display,
    {
        let value = self.parse(var, default)?;
        if value == T::default() {
            return Err(ConfigError::Invalid {
                var,
                value: value.to_string(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(value)
    }

    fn millis(&self, var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
        Ok(self
            .optional::<u64>(var)?
            .map_or(default, Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AssistantConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        AssistantConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.store.path, PathBuf::from("corporate.db"));
        assert_eq!(config.store.max_results, 50);
        assert_eq!(config.store.busy_timeout, Duration::from_millis(5000));
        assert_eq!(config.gateway.timeout, Duration::from_millis(10_000));
        assert_eq!(config.ollama, OllamaConfig::default());
        assert_eq!(config.generation, GenerationOptions::default());
        assert_eq!(config.max_iterations, 6);
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("CORPORATE_DB_PATH", "/var/lib/corp/data.db"),
            ("CORPORATE_MAX_RESULTS", "10"),
            ("GATEWAY_TIMEOUT_MS", "250"),
            ("OLLAMA_PORT", "11500"),
            ("ASSISTANT_MODEL", "qwen2.5"),
            ("ASSISTANT_TOP_K", "40"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();

        assert_eq!(config.store.path, PathBuf::from("/var/lib/corp/data.db"));
        assert_eq!(config.store.max_results, 10);
        assert_eq!(config.gateway.timeout, Duration::from_millis(250));
        assert_eq!(config.ollama.port, 11500);
        assert_eq!(config.generation.model, "qwen2.5");
        assert_eq!(config.generation.top_k, Some(40));
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn blank_values_use_defaults() {
        let config = config(&[("ASSISTANT_MODEL", "  "), ("OLLAMA_PORT", "")]).unwrap();
        assert_eq!(config.generation.model, "llama3.2");
        assert_eq!(config.ollama.port, 11434);
    }

    #[test]
    fn unparseable_value_names_the_variable() {
        let err = config(&[("GATEWAY_TIMEOUT_MS", "soon")]).unwrap_err();
        let ConfigError::Invalid { var, value, .. } = &err;
        assert_eq!(*var, "GATEWAY_TIMEOUT_MS");
        assert_eq!(value, "soon");
        assert!(err.to_string().contains("GATEWAY_TIMEOUT_MS"));
    }

    #[test]
    fn zero_result_cap_is_rejected() {
        assert!(config(&[("CORPORATE_MAX_RESULTS", "0")]).is_err());
    }

    #[test]
    fn zero_gateway_timeout_is_rejected() {
        let err = config(&[("GATEWAY_TIMEOUT_MS", "0")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "GATEWAY_TIMEOUT_MS",
                value: "0".into(),
                reason: "must be greater than zero".into(),
            }
        );
        assert_eq!(
            config(&[("GATEWAY_TIMEOUT_MS", "1")]).unwrap().gateway.timeout,
            Duration::from_millis(1)
        );
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let ConfigError::Invalid { var, .. } =
            config(&[("ASSISTANT_MAX_ITERATIONS", "0")]).unwrap_err();
        assert_eq!(var, "ASSISTANT_MAX_ITERATIONS");
        assert_eq!(config(&[("ASSISTANT_MAX_ITERATIONS", "2")]).unwrap().max_iterations, 2);
    }
}
