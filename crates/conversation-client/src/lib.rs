//! # Conversation client
//!
//! Defines the [`ConversationClient`] trait (one generation per call, optionally continuing an earlier
//! exchange), a [`DeadlineClient`] that bounds any client by a hard deadline, and an OpenAI
//! implementation that threads multi-turn context through an in-process [`ConversationStore`].

mod config;
mod deadline;
mod error;
mod openai;
mod store;
mod types;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_QUERY_TIMEOUT_SECS};
pub use deadline::DeadlineClient;
pub use error::{ConversationError, Result};
pub use openai::{default_system_prompt, OpenAIConversationClient};
pub use store::{ConversationStore, StoredMessage};
pub use types::{Continuation, ConversationRequest, ConversationResponse, Usage};

use async_trait::async_trait;

/// Opaque generation backend: prompt text in, generated text plus usage out.
#[async_trait]
pub trait ConversationClient: Send + Sync {
    async fn send(&self, request: ConversationRequest) -> Result<ConversationResponse>;
}
