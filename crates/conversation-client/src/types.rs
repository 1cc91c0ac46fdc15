//! Request and response values exchanged with a [`crate::ConversationClient`].

use serde::{Deserialize, Serialize};

pub use openai_client::TokenUsage as Usage;

/// Where a request continues an earlier exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Continuation {
    pub conversation_id: String,
    /// Id of the previous turn's reply; the new prompt is threaded under it.
    pub parent_message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationRequest {
    pub text: String,
    pub continuation: Option<Continuation>,
}

impl ConversationRequest {
    /// A request that starts a new exchange.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            continuation: None,
        }
    }

    pub fn continuing(mut self, continuation: Option<Continuation>) -> Self {
        self.continuation = continuation;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub text: String,
    pub conversation_id: String,
    /// Id of the generated reply; pass it back as `parent_message_id` to continue.
    pub message_id: String,
    pub usage: Option<Usage>,
}

impl ConversationResponse {
    /// Continuation that threads the next request under this reply.
    pub fn continuation(&self) -> Continuation {
        Continuation {
            conversation_id: self.conversation_id.clone(),
            parent_message_id: self.message_id.clone(),
        }
    }
}
