//! Generic text handler: placeholder, backend call with the session's continuation, reply linked to the
//! original message, session update. The placeholder is retired on every path.

use std::sync::Arc;

use conversation_client::{ConversationClient, ConversationRequest, ConversationResponse};
use relay_bot::{session_key, Bot, HandlerResponse, RelayError, Result, Update};
use tracing::{info, instrument};

use super::send_plain_reply;
use crate::error_policy::relay_error;
use crate::session::SessionStore;
use crate::status::StatusMessage;

pub struct GenericTextHandler {
    bot: Arc<dyn Bot>,
    client: Arc<dyn ConversationClient>,
    sessions: Arc<SessionStore>,
}

impl GenericTextHandler {
    pub fn new(bot: Arc<dyn Bot>, client: Arc<dyn ConversationClient>, sessions: Arc<SessionStore>) -> Self {
        Self {
            bot,
            client,
            sessions,
        }
    }

    #[instrument(skip(self, update, text), fields(chat_id = update.chat.id, message_id = update.message_id))]
    pub async fn handle(&self, update: &Update, text: &str) -> Result<HandlerResponse> {
        let status = StatusMessage::post(self.bot.clone(), update).await?;
        let outcome = self.converse(update, text).await;
        status.retire().await;

        let response = outcome?;
        Ok(HandlerResponse::Reply(response.text))
    }

    async fn converse(&self, update: &Update, text: &str) -> Result<ConversationResponse> {
        let key = session_key(update);
        let continuation = self.sessions.continuation(&key);
        info!(
            key = %key,
            continuing = continuation.is_some(),
            "step: generic query"
        );

        let response = self
            .client
            .send(ConversationRequest::new(text).continuing(continuation))
            .await
            .map_err(relay_error)?;
        if response.text.trim().is_empty() {
            return Err(RelayError::Backend("empty response from backend".to_string()));
        }

        // The session advances as soon as the user has seen part of the answer.
        let continuation = response.continuation();
        send_plain_reply(self.bot.as_ref(), update.chat.id, update.message_id, &response.text, || {
            self.sessions.record(key, continuation)
        })
        .await?;
        Ok(response)
    }
}
