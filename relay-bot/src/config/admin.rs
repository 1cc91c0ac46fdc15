//! Administrator set, forwarding destination and admin-only flag. Parsed once at startup, read-only after.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::env;
use tracing::warn;

/// Process-wide admin policy, passed explicitly to the forwarding and authorization stages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminConfig {
    admins: HashSet<i64>,
    log_chat: Option<i64>,
    admin_only: bool,
}

/// Parses `1/true/yes/on` (case-insensitive) as true; anything else is false.
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl AdminConfig {
    /// Builds from raw values. Non-numeric admin entries are skipped with a warning; an unparsable
    /// forwarding destination is an error.
    pub fn from_parts(admins_csv: &str, log_chat: Option<&str>, admin_only: bool) -> Result<Self> {
        let admins = admins_csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| match s.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    warn!(entry = %s, "BOT_ADMIN: skipping non-numeric entry");
                    None
                }
            })
            .collect();

        let log_chat = match log_chat.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(
                s.parse::<i64>()
                    .with_context(|| format!("BOT_LOG_CHAT is not a chat id: {}", s))?,
            ),
            None => None,
        };

        Ok(Self {
            admins,
            log_chat,
            admin_only,
        })
    }

    /// Loads from env: BOT_ADMIN (csv), BOT_LOG_CHAT, BOT_ADMIN_ONLY.
    pub fn from_env() -> Result<Self> {
        let admins = env::var("BOT_ADMIN").unwrap_or_default();
        let log_chat = env::var("BOT_LOG_CHAT").ok();
        let admin_only = env::var("BOT_ADMIN_ONLY")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        Self::from_parts(&admins, log_chat.as_deref(), admin_only)
    }

    pub fn is_admin(&self, chat_id: i64) -> bool {
        self.admins.contains(&chat_id)
    }

    /// Destination for forwarded non-command traffic; `None` turns forwarding off.
    pub fn log_chat(&self) -> Option<i64> {
        self.log_chat
    }

    pub fn admin_only(&self) -> bool {
        self.admin_only
    }

    pub fn admin_count(&self) -> usize {
        self.admins.len()
    }
}
