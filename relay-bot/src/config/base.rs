//! Base config: Telegram connectivity and logging. Loaded from env.

use anyhow::{Context, Result};
use std::env;

/// Telegram credential and optional Bot API URL. LOG_FILE is read separately, see [`BaseConfig::log_file_from_env`].
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
}

impl BaseConfig {
    /// Reads env; a CLI `token` wins over BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = token
            .map(Ok)
            .unwrap_or_else(|| env::var("BOT_TOKEN").context("BOT_TOKEN not set"))?;
        let telegram_api_url = ["TELEGRAM_API_URL", "TELOXIDE_API_URL"]
            .iter()
            .find_map(|key| non_blank_var(key));

        Ok(Self {
            bot_token,
            telegram_api_url,
        })
    }

    /// LOG_FILE, if set and non-blank; stdout only when unset. Read before the rest of config so logging starts first.
    pub fn log_file_from_env() -> Option<String> {
        non_blank_var("LOG_FILE")
    }

    /// Token must be non-blank; the API URL, when present, must parse.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(url) = self.telegram_api_url.as_deref() {
            reqwest::Url::parse(url)
                .with_context(|| format!("Bot API URL is not a valid URL: {}", url))?;
        }
        Ok(())
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
