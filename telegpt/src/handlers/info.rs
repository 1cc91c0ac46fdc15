//! Static /start and /help replies.

use relay_bot::{Bot, HandlerResponse, Result, TextFormat, Update};
use tracing::info;

use crate::messages::{HELP_TEXT, START_TEXT};

pub async fn reply_start(bot: &dyn Bot, update: &Update) -> Result<HandlerResponse> {
    bot.reply_to(update, START_TEXT, TextFormat::Html).await?;
    info!(
        chat_id = update.chat.id,
        user = ?update.user,
        "New user started the bot"
    );
    Ok(HandlerResponse::Reply(START_TEXT.to_string()))
}

pub async fn reply_help(bot: &dyn Bot, update: &Update) -> Result<HandlerResponse> {
    bot.reply_to(update, HELP_TEXT, TextFormat::Html).await?;
    info!(chat_id = update.chat.id, "Help sent");
    Ok(HandlerResponse::Reply(HELP_TEXT.to_string()))
}
