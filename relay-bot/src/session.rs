//! Conversation key derivation. One key serves both update ordering and per-conversation session state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::Update;

/// Ordering and session-isolation key: the chat id, stringified.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConversationKey(String);

impl ConversationKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for ConversationKey {
    fn from(chat_id: i64) -> Self {
        Self(chat_id.to_string())
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives the conversation key for an update. Used by the dispatcher and by session lookups alike.
pub fn session_key(update: &Update) -> ConversationKey {
    ConversationKey::from(update.chat.id)
}
