//! Recovery policy for classified failures. Installed as the chain's error handler.

use std::sync::Arc;

use async_trait::async_trait;
use conversation_client::ConversationError;
use relay_bot::{Bot, ErrorHandler, ErrorKind, HandlerResponse, RelayError, Result, TextFormat, Update};
use teloxide::utils::html;
use tracing::{error, warn};

use crate::messages::{GENERIC_ERROR_NOTICE, PLATFORM_ERROR_NOTICE, TIMEOUT_NOTICE};

/// Maps a backend failure into the relay taxonomy.
pub fn relay_error(err: ConversationError) -> RelayError {
    match err {
        ConversationError::Timeout(deadline) => RelayError::Timeout(deadline),
        ConversationError::Backend(message) => RelayError::Backend(message),
        ConversationError::InvalidRequest(message) => RelayError::Unknown(message),
    }
}

/// Decides the user-visible outcome of a failed update:
/// unreachable recipient is logged only; a failed platform call gets a connectivity notice; a timeout
/// gets the timeout notice; anything else gets a generic notice, with the raw description only when
/// `expose_details` is set.
pub struct ErrorPolicy {
    bot: Arc<dyn Bot>,
    expose_details: bool,
}

impl ErrorPolicy {
    pub fn new(bot: Arc<dyn Bot>, expose_details: bool) -> Self {
        Self {
            bot,
            expose_details,
        }
    }

    /// Notice for `error`, or `None` when no reply may be attempted.
    pub fn notice(&self, error: &RelayError) -> Option<String> {
        match error.kind() {
            ErrorKind::RecipientUnreachable => None,
            ErrorKind::PlatformCallFailure => Some(PLATFORM_ERROR_NOTICE.to_string()),
            ErrorKind::Timeout => Some(TIMEOUT_NOTICE.to_string()),
            _ if self.expose_details => Some(format!(
                "{}\n<i>Error: {}</i>",
                GENERIC_ERROR_NOTICE,
                html::escape(&error.to_string())
            )),
            _ => Some(GENERIC_ERROR_NOTICE.to_string()),
        }
    }
}

#[async_trait]
impl ErrorHandler for ErrorPolicy {
    async fn handle_error(&self, update: &Update, err: RelayError) -> Result<HandlerResponse> {
        let record = err.record();
        match record.kind {
            ErrorKind::RecipientUnreachable => warn!(
                chat_id = update.chat.id,
                kind = %record.kind,
                error = %record.description,
                "Recipient unreachable, not replying"
            ),
            ErrorKind::Timeout => warn!(
                chat_id = update.chat.id,
                kind = %record.kind,
                error = %record.description,
                "Query timed out"
            ),
            _ => error!(
                chat_id = update.chat.id,
                kind = %record.kind,
                error = %record.description,
                "Update failed"
            ),
        }

        if let Some(notice) = self.notice(&err) {
            self.bot.reply_to(update, &notice, TextFormat::Html).await?;
        }
        Ok(HandlerResponse::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_bot::testing::RecordingBot;
    use std::time::Duration;

    fn policy(expose: bool) -> ErrorPolicy {
        ErrorPolicy::new(Arc::new(RecordingBot::new()), expose)
    }

    #[test]
    fn conversation_errors_map_to_relay_kinds() {
        assert_eq!(
            relay_error(ConversationError::Timeout(Duration::from_secs(60))).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            relay_error(ConversationError::Backend("x".into())).kind(),
            ErrorKind::UnknownFailure
        );
        assert_eq!(
            relay_error(ConversationError::InvalidRequest("x".into())).kind(),
            ErrorKind::UnknownFailure
        );
    }

    #[test]
    fn notices_follow_precedence() {
        let p = policy(false);
        let unreachable = RelayError::RecipientUnreachable {
            method: "sendMessage".into(),
            message: "blocked".into(),
        };
        let platform = RelayError::Platform {
            method: "sendMessage".into(),
            message: "reset".into(),
        };
        assert_eq!(p.notice(&unreachable), None);
        assert_eq!(p.notice(&platform).as_deref(), Some(PLATFORM_ERROR_NOTICE));
        assert_eq!(
            p.notice(&RelayError::Timeout(Duration::from_secs(60))).as_deref(),
            Some(TIMEOUT_NOTICE)
        );
    }

    #[test]
    fn details_are_redacted_unless_exposed() {
        let err = RelayError::Backend("quota <exceeded>".into());
        assert_eq!(policy(false).notice(&err).as_deref(), Some(GENERIC_ERROR_NOTICE));
        let exposed = policy(true).notice(&err).unwrap();
        assert!(exposed.contains("quota &lt;exceeded&gt;"), "{}", exposed);
    }
}
