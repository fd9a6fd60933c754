//! Error types for newsdesk.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsdeskError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Upstream error {status}: {message}")]
    Upstream {
        status: u16,
        message: String,
        /// Delay requested by the upstream `Retry-After` header, in seconds.
        retry_after: Option<u64>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Lookup error: {0}")]
    Lookup(String),

    #[error("Delegate error: {0}")]
    Delegate(String),

    #[error("Coordination error: {0}")]
    Coordination(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NewsdeskError {
    /// Whether repeating the same request could succeed.
    ///
    /// Rate limits, server-side failures and dropped connections qualify;
    /// auth failures and malformed requests do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Transport(_) => true,
            _ => false,
        }
    }

    /// Upstream-requested backoff in milliseconds, if any.
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::Upstream {
                retry_after: Some(secs),
                ..
            } => Some(secs.saturating_mul(1000)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, NewsdeskError>;
