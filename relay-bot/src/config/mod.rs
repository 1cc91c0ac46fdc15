//! Relay configuration: BaseConfig (Telegram + log) + AdminConfig (admins, forwarding, admin-only).

mod admin;
mod base;
mod bot_config;

#[cfg(test)]
mod tests;

pub use admin::{parse_flag, AdminConfig};
pub use base::BaseConfig;
pub use bot_config::BotConfig;
