use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TryOnError {
    #[error("image decode failed: {0}")]
    Decode(String),

    #[error("image encode failed: {0}")]
    Encode(String),

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("transport error: {0}")]
    Transport(String),

    /// The remote reported a terminal job failure. Displays the remote's own message.
    #[error("{0}")]
    RemoteJob(String),

    #[error("max retries exceeded after {attempts} attempts{}", last_error_suffix(.last_error))]
    RetryBudgetExhausted {
        attempts: u32,
        last_error: Option<String>,
    },

    #[error("request deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    #[error("configuration error: {0}")]
    Config(String),
}

impl TryOnError {
    /// Failures caused by the remote service rather than by local input or limits.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Submission(_) | Self::Transport(_) | Self::RemoteJob(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::RetryBudgetExhausted { .. } | Self::DeadlineExceeded(_)
        )
    }
}

fn last_error_suffix(last_error: &Option<String>) -> String {
    last_error
        .as_ref()
        .map(|e| format!(" (last error: {e})"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, TryOnError>;
