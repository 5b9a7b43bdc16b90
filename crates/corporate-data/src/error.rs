//! Error Types for the corporate store

use agent_core::AgentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Connection, I/O or query fault in the backing database
    #[error("Store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StoreError> for AgentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Config(msg) => Self::Config(msg),
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}
