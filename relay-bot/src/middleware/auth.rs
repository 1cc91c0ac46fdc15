//! Admin-only gate.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::chain::Next;
use crate::config::AdminConfig;
use crate::core::{Bot, ErrorKind, HandlerResponse, Middleware, Result, TextFormat, Update};

pub const ACCESS_DENIED_NOTICE: &str = "<b>This bot is restricted to its administrators.</b>";

/// In admin-only mode, answers non-command text from non-admin chats with a denial notice and stops
/// the chain. Otherwise continues.
pub struct AdminGate {
    bot: Arc<dyn Bot>,
    admin: Arc<AdminConfig>,
}

impl AdminGate {
    pub fn new(bot: Arc<dyn Bot>, admin: Arc<AdminConfig>) -> Self {
        Self { bot, admin }
    }

    fn denies(&self, update: &Update) -> bool {
        self.admin.admin_only()
            && update.text.is_some()
            && !update.has_command_marker()
            && !self.admin.is_admin(update.chat.id)
    }
}

#[async_trait]
impl Middleware for AdminGate {
    #[instrument(skip(self, update, next))]
    async fn handle(&self, update: &Update, next: Next<'_>) -> Result<HandlerResponse> {
        let is_admin = self.admin.is_admin(update.chat.id);
        debug!(chat_id = update.chat.id, is_admin = is_admin, "Admin check");

        if self.denies(update) {
            info!(
                chat_id = update.chat.id,
                user_id = update.sender_id(),
                kind = %ErrorKind::AuthorizationDenied,
                "Admin-only mode: update rejected"
            );
            self.bot
                .reply_to(update, ACCESS_DENIED_NOTICE, TextFormat::Html)
                .await?;
            return Ok(HandlerResponse::Stop);
        }

        next.run(update).await
    }
}
