//! Dispatcher runner: converts teloxide messages and channel posts to core updates and hands them to the
//! [`Relay`]. Calls get_me first so the router can tell `/cmd@thisbot` from `/cmd@otherbot`.

use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::{prelude::*, types::Message};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;
use crate::core::ToCoreUpdate;
use crate::relay::Relay;

/// Builds the teloxide client, pointing it at `api_url` when set.
pub fn build_teloxide_bot(token: &str, api_url: Option<&str>) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(token);
    match api_url {
        Some(url_str) => {
            let url = reqwest::Url::parse(url_str)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url_str))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Calls get_me and stores the bot username into `bot_username`. Failure is logged, not fatal.
pub async fn fetch_bot_username(bot: &teloxide::Bot, bot_username: &RwLock<Option<String>>) {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; commands addressed to other bots cannot be told apart"),
    }
}

async fn relay_message(msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
    let update = TelegramMessageWrapper(&msg).to_core();
    debug!(
        chat_id = update.chat.id,
        message_id = update.message_id,
        "step: update received"
    );
    relay.process(update).await;
    Ok(())
}

/// Runs the long-polling dispatcher until Ctrl-C. Messages and channel posts both go through `relay`.
#[instrument(skip_all)]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    relay: Relay,
    bot_username: Arc<RwLock<Option<String>>>,
) -> Result<()> {
    fetch_bot_username(&bot, &bot_username).await;

    let handler = dptree::entry()
        .branch(teloxide::types::Update::filter_message().endpoint(relay_message))
        .branch(teloxide::types::Update::filter_channel_post().endpoint(relay_message));

    info!("Starting dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::new(relay)])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update kind");
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("Dispatcher stopped");

    Ok(())
}
