//! `/tom`: answers a quoted message in character.

use std::sync::Arc;

use conversation_client::{ConversationClient, ConversationRequest};
use relay_bot::{Bot, ErrorKind, HandlerResponse, RelayError, Result, TextFormat, Update};
use tracing::{info, instrument};

use super::send_plain_reply;
use crate::error_policy::relay_error;
use crate::messages::TOM_USAGE_NOTICE;
use crate::status::StatusMessage;

/// Priming prompt for the persona, with the quoted text embedded verbatim.
pub fn persona_prompt(quoted: &str) -> String {
    format!(
        "You are Tom, a laid-back, sarcastic but good-hearted friend. Stay in character, keep it short and \
         casual, and never mention being an AI. Someone just said this to you:\n\n\"{}\"\n\nReply as Tom.",
        quoted
    )
}

/// Requires the command to quote a text message; replies to the quoted message, not the command.
pub struct PersonaHandler {
    bot: Arc<dyn Bot>,
    client: Arc<dyn ConversationClient>,
}

impl PersonaHandler {
    pub fn new(bot: Arc<dyn Bot>, client: Arc<dyn ConversationClient>) -> Self {
        Self { bot, client }
    }

    #[instrument(skip(self, update), fields(chat_id = update.chat.id))]
    pub async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let quoted = update.reply_to.as_ref().and_then(|quoted| {
            quoted
                .text
                .as_deref()
                .filter(|t| !t.trim().is_empty())
                .map(|text| (quoted.message_id, text))
        });
        let Some((quoted_id, quoted_text)) = quoted else {
            info!(
                chat_id = update.chat.id,
                kind = %ErrorKind::UsageError,
                "/tom without a quoted text message"
            );
            self.bot
                .reply_to(update, TOM_USAGE_NOTICE, TextFormat::Html)
                .await?;
            return Ok(HandlerResponse::Stop);
        };

        let status = StatusMessage::post(self.bot.clone(), update).await?;
        let outcome = self.answer(update, quoted_id, quoted_text).await;
        status.retire().await;
        outcome
    }

    async fn answer(&self, update: &Update, quoted_id: i32, quoted_text: &str) -> Result<HandlerResponse> {
        let response = self
            .client
            .send(ConversationRequest::new(persona_prompt(quoted_text)))
            .await
            .map_err(relay_error)?;
        if response.text.trim().is_empty() {
            return Err(RelayError::Backend("empty response from backend".to_string()));
        }
        send_plain_reply(self.bot.as_ref(), update.chat.id, quoted_id, &response.text, || {}).await?;
        Ok(HandlerResponse::Reply(response.text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_quote_verbatim() {
        let prompt = persona_prompt("Is \"pineapple\" on pizza OK?");
        assert!(prompt.contains("\"Is \"pineapple\" on pizza OK?\""));
        assert!(prompt.starts_with("You are Tom"));
    }
}
