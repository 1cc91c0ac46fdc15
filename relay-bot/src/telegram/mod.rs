//! Telegram transport: update conversion, Bot implementation, dispatcher runner.

mod adapters;
mod bot_adapter;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{map_request_error, TelegramBotAdapter};
pub use runner::{build_teloxide_bot, fetch_bot_username, run_dispatcher};
