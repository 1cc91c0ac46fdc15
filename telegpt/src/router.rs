//! Endpoint of the middleware chain: `/start`, `/help`, `/tom`, then the generic text handler.

use std::sync::Arc;

use async_trait::async_trait;
use conversation_client::ConversationClient;
use relay_bot::{Bot, ChatKind, Handler, HandlerResponse, Result, Update};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::commands::{parse_command, Command};
use crate::config::GenericScope;
use crate::handlers::{reply_help, reply_start, GenericTextHandler, PersonaHandler};
use crate::session::SessionStore;

pub struct CommandRouter {
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
    scope: GenericScope,
    persona: PersonaHandler,
    generic: GenericTextHandler,
}

impl CommandRouter {
    pub fn new(
        bot: Arc<dyn Bot>,
        client: Arc<dyn ConversationClient>,
        sessions: Arc<SessionStore>,
        bot_username: Arc<RwLock<Option<String>>>,
        scope: GenericScope,
    ) -> Self {
        Self {
            persona: PersonaHandler::new(bot.clone(), client.clone()),
            generic: GenericTextHandler::new(bot.clone(), client, sessions),
            bot,
            bot_username,
            scope,
        }
    }

    /// Whether the generic handler answers `update` under the configured scope.
    pub fn is_generic_eligible(&self, update: &Update) -> bool {
        match self.scope {
            GenericScope::All => true,
            GenericScope::Private => {
                update.chat.kind == ChatKind::Private || update.starts_with_command()
            }
        }
    }
}

#[async_trait]
impl Handler for CommandRouter {
    #[instrument(skip(self, update), fields(chat_id = update.chat.id, message_id = update.message_id))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let Some(text) = update.text.as_deref() else {
            debug!("Non-text update, nothing to route");
            return Ok(HandlerResponse::Ignore);
        };

        if let Some(parsed) = parse_command(text) {
            let bot_username = self.bot_username.read().await.clone();
            if !parsed.is_for(bot_username.as_deref()) {
                debug!(target_bot = ?parsed.target, "Command addressed to another bot");
                return Ok(HandlerResponse::Ignore);
            }
            match parsed.command() {
                Some(Command::Start) => return reply_start(self.bot.as_ref(), update).await,
                Some(Command::Help) => return reply_help(self.bot.as_ref(), update).await,
                Some(Command::Tom) => return self.persona.handle(update).await,
                None => {}
            }
        }

        if !self.is_generic_eligible(update) {
            debug!(chat_kind = update.chat.kind.as_str(), "Not eligible for the generic handler");
            return Ok(HandlerResponse::Ignore);
        }
        self.generic.handle(update, text).await
    }
}
