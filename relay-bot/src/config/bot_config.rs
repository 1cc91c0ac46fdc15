//! Bot config: base (Telegram connectivity) plus admin policy.

use anyhow::Result;

use super::admin::AdminConfig;
use super::base::BaseConfig;

/// Everything the relay framework reads at startup.
#[derive(Debug, Clone)]
pub struct BotConfig {
    base: BaseConfig,
    admin: AdminConfig,
}

impl BotConfig {
    pub fn new(base: BaseConfig, admin: AdminConfig) -> Self {
        Self { base, admin }
    }

    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            admin: AdminConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }

    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }

    pub fn admin(&self) -> &AdminConfig {
        &self.admin
    }
}
