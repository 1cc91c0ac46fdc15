//! Wraps teloxide::Bot and implements [`crate::core::Bot`]. Production code talks to Telegram; tests can
//! substitute another Bot impl.

use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{ChatId, MessageId, ParseMode, ReplyParameters},
    ApiError, RequestError,
};

use crate::core::{Bot as CoreBot, MessageRef, RelayError, Result, SendOptions, TextFormat};

/// Maps a teloxide failure of Bot API `method` onto the relay taxonomy. Delivery refusals (blocked,
/// kicked, deactivated) are `RecipientUnreachable`; everything else is a platform call failure.
pub fn map_request_error(method: &str, err: RequestError) -> RelayError {
    match &err {
        RequestError::Api(
            ApiError::BotBlocked
            | ApiError::BotKicked
            | ApiError::BotKickedFromSupergroup
            | ApiError::UserDeactivated
            | ApiError::CantInitiateConversation,
        ) => RelayError::RecipientUnreachable {
            method: method.to_string(),
            message: err.to_string(),
        },
        _ => RelayError::Platform {
            method: method.to_string(),
            message: err.to_string(),
        },
    }
}

/// Thin wrapper around teloxide::Bot that implements core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<MessageRef> {
        let mut req = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(id) = options.reply_to {
            req = req.reply_parameters(ReplyParameters::new(MessageId(id)).allow_sending_without_reply());
        }
        if options.format == TextFormat::Html {
            req = req.parse_mode(ParseMode::Html);
        }
        let sent = req.await.map_err(|e| map_request_error("sendMessage", e))?;
        Ok(MessageRef {
            chat_id: sent.chat.id.0,
            message_id: sent.id.0,
        })
    }

    async fn forward(&self, to_chat_id: i64, source: MessageRef) -> Result<MessageRef> {
        let sent = self
            .bot
            .forward_message(
                ChatId(to_chat_id),
                ChatId(source.chat_id),
                MessageId(source.message_id),
            )
            .await
            .map_err(|e| map_request_error("forwardMessage", e))?;
        Ok(MessageRef {
            chat_id: sent.chat.id.0,
            message_id: sent.id.0,
        })
    }

    async fn delete_message(&self, message: MessageRef) -> Result<()> {
        self.bot
            .delete_message(ChatId(message.chat_id), MessageId(message.message_id))
            .await
            .map_err(|e| map_request_error("deleteMessage", e))?;
        Ok(())
    }

    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(
                ChatId(message.chat_id),
                MessageId(message.message_id),
                text.to_string(),
            )
            .await
            .map_err(|e| map_request_error("editMessageText", e))?;
        Ok(())
    }
}
