//! Per-conversation session state: the continuation of the last exchange. Only the task holding the
//! conversation's dispatcher turn reads or writes its entry.

use conversation_client::Continuation;
use dashmap::DashMap;
use relay_bot::ConversationKey;

/// Conversation key -> continuation of the most recent reply. Lives for the process lifetime.
#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<ConversationKey, Continuation>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn continuation(&self, key: &ConversationKey) -> Option<Continuation> {
        self.sessions.get(key).map(|entry| entry.value().clone())
    }

    pub fn record(&self, key: ConversationKey, continuation: Continuation) {
        self.sessions.insert(key, continuation);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
