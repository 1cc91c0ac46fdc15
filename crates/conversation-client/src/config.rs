//! Backend configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_HISTORY_MESSAGES: usize = 20;
const DEFAULT_MAX_STORED_MESSAGES: usize = 10_000;

/// Backend configuration for OpenAI-compatible APIs.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
    fn system_prompt(&self) -> Option<&str>;
    fn query_timeout(&self) -> Duration;
    fn max_history_messages(&self) -> usize;
    fn max_stored_messages(&self) -> usize;
}

/// Backend config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_model: String,
    pub llm_system_prompt: Option<String>,
    pub query_timeout_secs: u64,
    pub max_history_messages: usize,
    pub max_stored_messages: usize,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.openai_api_key
    }
    fn base_url(&self) -> &str {
        &self.openai_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
    fn system_prompt(&self) -> Option<&str> {
        self.llm_system_prompt.as_deref()
    }
    fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
    fn max_history_messages(&self) -> usize {
        self.max_history_messages
    }
    fn max_stored_messages(&self) -> usize {
        self.max_stored_messages
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl EnvLlmConfig {
    /// Load from environment variables. OPENAI_API_KEY (or API_KEY) is required.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .context("OPENAI_API_KEY not set")?;
        if openai_api_key.trim().is_empty() {
            anyhow::bail!("OPENAI_API_KEY is empty");
        }
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let llm_model = env::var("MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());
        let llm_system_prompt = env::var("SYSTEM_PROMPT")
            .or_else(|_| env::var("LLM_SYSTEM_PROMPT"))
            .ok()
            .filter(|s| !s.trim().is_empty());
        let query_timeout_secs =
            parse_or("QUERY_TIMEOUT_SECS", DEFAULT_QUERY_TIMEOUT_SECS).max(1);

        Ok(Self {
            openai_api_key,
            openai_base_url,
            llm_model,
            llm_system_prompt,
            query_timeout_secs,
            max_history_messages: parse_or("MAX_HISTORY_MESSAGES", DEFAULT_MAX_HISTORY_MESSAGES),
            max_stored_messages: parse_or("MAX_STORED_MESSAGES", DEFAULT_MAX_STORED_MESSAGES),
        })
    }
}
