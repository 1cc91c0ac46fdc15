//! Inbound update type and platform message handles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{chat::Chat, user::User};

/// The message an update replies to (quoted message).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepliedMessage {
    pub message_id: i32,
    pub text: Option<String>,
}

/// One inbound event. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Update {
    /// Platform message id, used for reply-linking and forwarding.
    pub message_id: i32,
    pub chat: Chat,
    /// Sender; `None` for channel posts, where the chat itself is the identity.
    pub user: Option<User>,
    pub text: Option<String>,
    pub reply_to: Option<RepliedMessage>,
    pub received_at: DateTime<Utc>,
}

impl Update {
    /// Handle to this update's message in its chat.
    pub fn message_ref(&self) -> MessageRef {
        MessageRef {
            chat_id: self.chat.id,
            message_id: self.message_id,
        }
    }

    /// Sender id, or the chat id when there is no sender.
    pub fn sender_id(&self) -> i64 {
        self.user.as_ref().map(|u| u.id).unwrap_or(self.chat.id)
    }

    /// Name shown in logs and forward headers: trimmed "first last", else the chat title.
    pub fn display_name(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(User::full_name)
            .or_else(|| self.chat.title.clone())
    }

    /// True when the text carries a command marker anywhere.
    pub fn has_command_marker(&self) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains('/'))
    }

    /// True when the text begins with a command marker.
    pub fn starts_with_command(&self) -> bool {
        self.text.as_deref().is_some_and(|t| t.starts_with('/'))
    }
}

/// Handle to a message already on the platform (sent placeholder, forwarded source, quoted message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}
