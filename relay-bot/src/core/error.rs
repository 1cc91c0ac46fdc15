//! Error types for the relay core.
//!
//! [`RelayError`] is the top-level error; [`ErrorKind`] is the classification used to pick a recovery policy.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Top-level error for the relay (transport calls, backend, config, IO).
#[derive(Error, Debug)]
pub enum RelayError {
    /// The platform refused delivery to this recipient (bot blocked, kicked, user deactivated).
    #[error("Recipient unreachable during {method}: {message}")]
    RecipientUnreachable { method: String, message: String },

    /// A platform call (send/forward/delete/edit) failed.
    #[error("Call to '{method}' failed: {message}")]
    Platform { method: String, message: String },

    #[error("Query timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Failure taxonomy. `AuthorizationDenied` and `UsageError` are outcomes that are logged at the point
/// of detection; they are never raised as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Timeout,
    RecipientUnreachable,
    PlatformCallFailure,
    UnknownFailure,
    AuthorizationDenied,
    UsageError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "timeout",
            ErrorKind::RecipientUnreachable => "recipient_unreachable",
            ErrorKind::PlatformCallFailure => "platform_call_failure",
            ErrorKind::UnknownFailure => "unknown_failure",
            ErrorKind::AuthorizationDenied => "authorization_denied",
            ErrorKind::UsageError => "usage_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RelayError {
    /// Classifies in precedence order: recipient unreachable, platform call failure, then the rest.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RelayError::RecipientUnreachable { .. } => ErrorKind::RecipientUnreachable,
            RelayError::Platform { .. } => ErrorKind::PlatformCallFailure,
            RelayError::Timeout(_) => ErrorKind::Timeout,
            RelayError::Backend(_)
            | RelayError::Config(_)
            | RelayError::Io(_)
            | RelayError::Unknown(_) => ErrorKind::UnknownFailure,
        }
    }

    pub fn record(&self) -> ErrorRecord {
        ErrorRecord {
            kind: self.kind(),
            description: self.to_string(),
        }
    }
}

/// Classified failure plus its description; what the error policy decides on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub description: String,
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_precedence() {
        let blocked = RelayError::RecipientUnreachable {
            method: "sendMessage".into(),
            message: "Forbidden: bot was blocked by the user".into(),
        };
        assert_eq!(blocked.kind(), ErrorKind::RecipientUnreachable);

        let platform = RelayError::Platform {
            method: "sendMessage".into(),
            message: "network".into(),
        };
        assert_eq!(platform.kind(), ErrorKind::PlatformCallFailure);
        assert_eq!(platform.to_string(), "Call to 'sendMessage' failed: network");

        assert_eq!(RelayError::Timeout(Duration::from_secs(60)).kind(), ErrorKind::Timeout);
        assert_eq!(RelayError::Backend("boom".into()).kind(), ErrorKind::UnknownFailure);
    }

    #[test]
    fn record_carries_description() {
        let record = RelayError::Timeout(Duration::from_secs(60)).record();
        assert_eq!(record.kind, ErrorKind::Timeout);
        assert_eq!(record.description, "Query timed out after 60s");
    }
}
