//! Conversation client errors.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    /// The deadline expired before the backend answered. The backend call was dropped.
    #[error("Query timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, ConversationError>;
