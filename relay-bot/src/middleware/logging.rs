//! Logging and forwarding stage: logs every update and mirrors non-command text to the log chat.
//! A failed mirror call is a platform call failure: the update stops here and the error goes to the
//! chain's error handler.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::utils::html;
use tracing::{info, instrument, warn};

use crate::chain::Next;
use crate::config::AdminConfig;
use crate::core::{Bot, HandlerResponse, Middleware, Result, SendOptions, Update};

/// HTML header sent to the log chat ahead of each forwarded message.
pub fn forward_header(update: &Update) -> String {
    let name = update.display_name().unwrap_or_else(|| "unknown".to_string());
    let username = update
        .user
        .as_ref()
        .and_then(|u| u.username.as_deref())
        .map(|u| format!(" (@{})", html::escape(u)))
        .unwrap_or_default();
    format!(
        "<b>From: {}{} ID: <code>{}</code></b>",
        html::escape(&name),
        username,
        update.sender_id()
    )
}

/// Logs sender and text; when a log chat is configured, forwards a header plus the original message for
/// text without a command marker. Forwarding failures are logged and never stop the update.
pub struct LoggingForwarder {
    bot: Arc<dyn Bot>,
    admin: Arc<AdminConfig>,
}

impl LoggingForwarder {
    pub fn new(bot: Arc<dyn Bot>, admin: Arc<AdminConfig>) -> Self {
        Self { bot, admin }
    }

    async fn forward(&self, log_chat: i64, update: &Update) -> Result<()> {
        self.bot
            .send_message(log_chat, &forward_header(update), SendOptions::html())
            .await?;
        self.bot.forward(log_chat, update.message_ref()).await?;
        Ok(())
    }
}

#[async_trait]
impl Middleware for LoggingForwarder {
    #[instrument(skip(self, update, next))]
    async fn handle(&self, update: &Update, next: Next<'_>) -> Result<HandlerResponse> {
        let name = update.display_name().unwrap_or_else(|| "unknown".to_string());
        let username = update
            .user
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .unwrap_or("unknown");
        match update.text.as_deref() {
            Some(text) => info!(
                from = %name,
                username = %username,
                user_id = update.sender_id(),
                chat_id = update.chat.id,
                message = %text,
                "Received message"
            ),
            None => info!(
                from = %name,
                username = %username,
                user_id = update.sender_id(),
                chat_id = update.chat.id,
                "Received non-text update"
            ),
        }

        if let Some(log_chat) = self.admin.log_chat() {
            if update.text.is_some() && !update.has_command_marker() {
                if let Err(e) = self.forward(log_chat, update).await {
                    warn!(
                        chat_id = update.chat.id,
                        log_chat = log_chat,
                        kind = %e.kind(),
                        error = %e,
                        "Failed to forward message to log chat"
                    );
                    return Err(e);
                }
            }
        }

        next.run(update).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Chat, ChatKind, User};
    use chrono::Utc;

    #[test]
    fn header_names_sender_and_escapes_html() {
        let update = Update {
            message_id: 1,
            chat: Chat {
                id: 5,
                kind: ChatKind::Private,
                title: None,
            },
            user: Some(User {
                id: 5,
                username: Some("ada".into()),
                first_name: Some("Ada <3".into()),
                last_name: Some("L".into()),
            }),
            text: Some("hi".into()),
            reply_to: None,
            received_at: Utc::now(),
        };
        assert_eq!(
            forward_header(&update),
            "<b>From: Ada &lt;3 L (@ada) ID: <code>5</code></b>"
        );
    }
}
