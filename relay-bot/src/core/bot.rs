//! Outbound messaging abstraction.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in `crate::telegram`.
//! Tests substitute a recording implementation.

use async_trait::async_trait;

use super::error::Result;
use super::types::{MessageRef, Update};

/// How the platform should render outgoing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    Html,
}

/// Options for [`Bot::send_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendOptions {
    /// Message id in the target chat to reply to; a missing target is not an error.
    pub reply_to: Option<i32>,
    pub format: TextFormat,
}

impl SendOptions {
    pub fn html() -> Self {
        Self {
            reply_to: None,
            format: TextFormat::Html,
        }
    }

    pub fn replying_to(mut self, message_id: i32) -> Self {
        self.reply_to = Some(message_id);
        self
    }
}

/// Outbound platform primitives used by middleware and handlers.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends text to a chat and returns a handle to the sent message.
    async fn send_message(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<MessageRef>;

    /// Forwards an existing message verbatim into `to_chat_id`.
    async fn forward(&self, to_chat_id: i64, source: MessageRef) -> Result<MessageRef>;

    async fn delete_message(&self, message: MessageRef) -> Result<()>;

    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<()>;

    /// Replies in the update's chat, linked to the update's message.
    async fn reply_to(&self, update: &Update, text: &str, format: TextFormat) -> Result<MessageRef> {
        let options = SendOptions {
            reply_to: Some(update.message_id),
            format,
        };
        self.send_message(update.chat.id, text, options).await
    }
}
