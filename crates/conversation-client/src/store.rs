//! In-process message store used to replay earlier turns of an exchange. Bounded; oldest messages are
//! evicted first. Nothing survives a restart.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use openai_client::{ChatRole, ChatTurn};

/// One stored turn, linked to the turn it answers or follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: String,
    pub conversation_id: String,
    pub parent_message_id: Option<String>,
    pub role: ChatRole,
    pub text: String,
}

impl StoredMessage {
    pub fn to_turn(&self) -> ChatTurn {
        ChatTurn {
            role: self.role,
            content: self.text.clone(),
        }
    }
}

#[derive(Default)]
struct Inner {
    messages: HashMap<String, StoredMessage>,
    order: VecDeque<String>,
}

/// Bounded id -> message map with insertion-order eviction.
pub struct ConversationStore {
    inner: Mutex<Inner>,
    max_messages: usize,
}

impl ConversationStore {
    pub fn new(max_messages: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_messages: max_messages.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn insert(&self, message: StoredMessage) {
        let mut inner = self.lock();
        if inner.messages.insert(message.id.clone(), message.clone()).is_none() {
            inner.order.push_back(message.id);
        }
        while inner.order.len() > self.max_messages {
            if let Some(oldest) = inner.order.pop_front() {
                inner.messages.remove(&oldest);
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<StoredMessage> {
        self.lock().messages.get(id).cloned()
    }

    /// Walks parent links from `last_id` and returns at most `limit` messages, oldest first.
    /// The walk stops at a missing (evicted) parent.
    pub fn history(&self, last_id: &str, limit: usize) -> Vec<StoredMessage> {
        let inner = self.lock();
        let mut chain = Vec::new();
        let mut cursor = Some(last_id.to_string());
        while let Some(id) = cursor {
            if chain.len() >= limit {
                break;
            }
            match inner.messages.get(&id) {
                Some(message) => {
                    cursor = message.parent_message_id.clone();
                    chain.push(message.clone());
                }
                None => break,
            }
        }
        chain.reverse();
        chain
    }

    pub fn len(&self) -> usize {
        self.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
