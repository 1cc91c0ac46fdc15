//! Conversion from teloxide types to core types.

use teloxide::types::Message;

use crate::core::{Chat, ChatKind, RepliedMessage, ToCoreUpdate, ToCoreUser, Update, User};

/// Telegram user to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            last_name: self.0.last_name.clone(),
        }
    }
}

/// Telegram message or channel post to core [`Update`].
pub struct TelegramMessageWrapper<'a>(pub &'a Message);

impl<'a> TelegramMessageWrapper<'a> {
    fn chat(&self) -> Chat {
        let chat = &self.0.chat;
        let kind = if chat.is_private() {
            ChatKind::Private
        } else if chat.is_channel() {
            ChatKind::Channel
        } else if chat.is_supergroup() {
            ChatKind::Supergroup
        } else {
            ChatKind::Group
        };
        Chat {
            id: chat.id.0,
            kind,
            title: chat.title().map(str::to_string),
        }
    }

    fn reply_to(&self) -> Option<RepliedMessage> {
        self.0.reply_to_message().map(|quoted| RepliedMessage {
            message_id: quoted.id.0,
            text: quoted
                .text()
                .or_else(|| quoted.caption())
                .map(str::to_string),
        })
    }
}

impl<'a> ToCoreUpdate for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Update {
        Update {
            message_id: self.0.id.0,
            chat: self.chat(),
            // Channel posts carry no sender; the chat is the identity.
            user: self.0.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
            text: self.0.text().map(str::to_string),
            reply_to: self.reply_to(),
            received_at: chrono::Utc::now(),
        }
    }
}
