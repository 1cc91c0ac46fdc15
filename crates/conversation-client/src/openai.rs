//! OpenAI-backed [`ConversationClient`]: prepends the system prompt, replays the parent chain of a
//! continuation from the [`ConversationStore`], and records both new turns on success.

use std::sync::Arc;

use async_trait::async_trait;
use openai_client::{ChatRole, ChatTurn, OpenAIClient};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::LlmConfig;
use crate::store::{ConversationStore, StoredMessage};
use crate::{ConversationClient, ConversationError, ConversationRequest, ConversationResponse, Result};

/// System prompt used when none is configured. Carries today's date.
pub fn default_system_prompt() -> String {
    format!(
        "You are a helpful assistant in a Telegram chat. Answer as concisely as possible.\nCurrent date: {}",
        chrono::Utc::now().format("%Y-%m-%d")
    )
}

/// ConversationClient over an OpenAI-compatible chat completion API.
#[derive(Clone)]
pub struct OpenAIConversationClient {
    client: OpenAIClient,
    model: String,
    system_prompt: Option<String>,
    store: Arc<ConversationStore>,
    max_history_messages: usize,
}

impl OpenAIConversationClient {
    pub fn new(client: OpenAIClient, model: impl Into<String>, store: Arc<ConversationStore>) -> Self {
        Self {
            client,
            model: model.into(),
            system_prompt: None,
            store,
            max_history_messages: 20,
        }
    }

    /// Builds client, store and limits from config.
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        let client = OpenAIClient::with_base_url(config.api_key().to_string(), config.base_url().to_string());
        Self::new(
            client,
            config.model(),
            Arc::new(ConversationStore::new(config.max_stored_messages())),
        )
        .with_system_prompt_opt(config.system_prompt().map(str::to_string))
        .with_max_history(config.max_history_messages())
    }

    pub fn with_system_prompt_opt(mut self, prompt: Option<String>) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_max_history(mut self, max_history_messages: usize) -> Self {
        self.max_history_messages = max_history_messages;
        self
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    fn system_content(&self) -> String {
        self.system_prompt
            .clone()
            .unwrap_or_else(default_system_prompt)
    }
}

#[async_trait]
impl ConversationClient for OpenAIConversationClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn send(&self, request: ConversationRequest) -> Result<ConversationResponse> {
        if request.text.trim().is_empty() {
            return Err(ConversationError::InvalidRequest("empty prompt".to_string()));
        }

        let (conversation_id, parent_message_id) = match request.continuation {
            Some(c) => (c.conversation_id, Some(c.parent_message_id)),
            None => (Uuid::new_v4().to_string(), None),
        };

        let history = parent_message_id
            .as_deref()
            .map(|parent| self.store.history(parent, self.max_history_messages))
            .unwrap_or_default();

        let mut turns = Vec::with_capacity(history.len() + 2);
        turns.push(ChatTurn::system(self.system_content()));
        turns.extend(history.iter().map(StoredMessage::to_turn));
        turns.push(ChatTurn::user(request.text.as_str()));

        let completion = self
            .client
            .chat_completion(&self.model, &turns)
            .await
            .map_err(|e| ConversationError::Backend(e.to_string()))?;

        let user_message_id = Uuid::new_v4().to_string();
        let reply_message_id = Uuid::new_v4().to_string();
        self.store.insert(StoredMessage {
            id: user_message_id.clone(),
            conversation_id: conversation_id.clone(),
            parent_message_id,
            role: ChatRole::User,
            text: request.text,
        });
        self.store.insert(StoredMessage {
            id: reply_message_id.clone(),
            conversation_id: conversation_id.clone(),
            parent_message_id: Some(user_message_id),
            role: ChatRole::Assistant,
            text: completion.text.clone(),
        });

        if let Some(usage) = &completion.usage {
            info!(
                conversation_id = %conversation_id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                history_turns = history.len(),
                "Conversation usage"
            );
        }

        Ok(ConversationResponse {
            text: completion.text,
            conversation_id,
            message_id: reply_message_id,
            usage: completion.usage,
        })
    }
}
