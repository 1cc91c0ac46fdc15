//! Shared builders for relay-bot integration tests.

#![allow(dead_code)]

use chrono::Utc;
use relay_bot::{Chat, ChatKind, RepliedMessage, Update, User};

pub const LOG_CHAT: i64 = -900;

pub fn private_text(chat_id: i64, message_id: i32, text: &str) -> Update {
    Update {
        message_id,
        chat: Chat {
            id: chat_id,
            kind: ChatKind::Private,
            title: None,
        },
        user: Some(User {
            id: chat_id,
            username: Some("ada".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        }),
        text: Some(text.to_string()),
        reply_to: None,
        received_at: Utc::now(),
    }
}

pub fn group_text(chat_id: i64, user_id: i64, message_id: i32, text: &str) -> Update {
    Update {
        message_id,
        chat: Chat {
            id: chat_id,
            kind: ChatKind::Supergroup,
            title: Some("Rust folks".to_string()),
        },
        user: Some(User {
            id: user_id,
            username: None,
            first_name: Some("Grace".to_string()),
            last_name: None,
        }),
        text: Some(text.to_string()),
        reply_to: None,
        received_at: Utc::now(),
    }
}

pub fn without_text(mut update: Update) -> Update {
    update.text = None;
    update
}

pub fn replying_to(mut update: Update, message_id: i32, text: &str) -> Update {
    update.reply_to = Some(RepliedMessage {
        message_id,
        text: Some(text.to_string()),
    });
    update
}
