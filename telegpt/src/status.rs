//! Transient "Processing" placeholder that is always retired.
//!
//! [`StatusMessage::retire`] deletes the placeholder, falling back to editing it to [`DONE_TEXT`] when
//! deletion fails. A guard dropped without `retire` (early return, unwinding) retires it from a
//! background task.

use std::sync::Arc;

use relay_bot::{Bot, MessageRef, Result, SendOptions, Update};
use tracing::{debug, warn};

use crate::messages::{DONE_TEXT, PROCESSING_NOTICE};

async fn retire_message(bot: &dyn Bot, message: MessageRef) {
    match bot.delete_message(message).await {
        Ok(()) => debug!(chat_id = message.chat_id, message_id = message.message_id, "Status message deleted"),
        Err(delete_err) => {
            warn!(error = %delete_err, message_id = message.message_id, "Status delete failed, editing instead");
            if let Err(edit_err) = bot.edit_message(message, DONE_TEXT).await {
                warn!(error = %edit_err, message_id = message.message_id, "Status message could not be retired");
            }
        }
    }
}

/// Scoped placeholder in the update's chat.
pub struct StatusMessage {
    bot: Arc<dyn Bot>,
    message: Option<MessageRef>,
}

impl StatusMessage {
    /// Sends the placeholder. Fails if the platform rejects it; nothing needs retiring then.
    pub async fn post(bot: Arc<dyn Bot>, update: &Update) -> Result<Self> {
        let message = bot
            .send_message(update.chat.id, PROCESSING_NOTICE, SendOptions::html())
            .await?;
        Ok(Self {
            bot,
            message: Some(message),
        })
    }

    pub fn message(&self) -> Option<MessageRef> {
        self.message
    }

    /// Removes the placeholder now. Failures are logged.
    pub async fn retire(mut self) {
        if let Some(message) = self.message.take() {
            retire_message(self.bot.as_ref(), message).await;
        }
    }
}

impl Drop for StatusMessage {
    fn drop(&mut self) {
        let Some(message) = self.message.take() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let bot = Arc::clone(&self.bot);
                handle.spawn(async move { retire_message(bot.as_ref(), message).await });
            }
            Err(_) => warn!(message_id = message.message_id, "No runtime to retire status message"),
        }
    }
}
