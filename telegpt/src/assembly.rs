//! Assembly: wires the chain stages, router and error policy into a [`Relay`], and runs the bot.

use std::sync::Arc;

use anyhow::Result;
use conversation_client::{
    ConversationClient, DeadlineClient, EnvLlmConfig, LlmConfig, OpenAIConversationClient,
};
use openai_client::mask_token;
use relay_bot::{
    build_teloxide_bot, run_dispatcher, AdminConfig, AdminGate, Bot, BotConfig, LoggingForwarder,
    MiddlewareChain, Relay, TelegramBotAdapter, TimingMiddleware,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error_policy::ErrorPolicy;
use crate::router::CommandRouter;
use crate::session::SessionStore;

/// Shared collaborators the relay is built from.
pub struct RelayComponents {
    pub bot: Arc<dyn Bot>,
    pub client: Arc<dyn ConversationClient>,
    pub sessions: Arc<SessionStore>,
    pub bot_username: Arc<RwLock<Option<String>>>,
}

/// Builds the relay: timing, then the [`ErrorPolicy`] boundary, logging/forwarding, admin gate and the
/// command router. Timing therefore covers error replies too.
pub fn build_relay(admin: Arc<AdminConfig>, app: &AppConfig, components: RelayComponents) -> Relay {
    let router = CommandRouter::new(
        components.bot.clone(),
        components.client,
        components.sessions,
        components.bot_username,
        app.generic_scope,
    );

    let chain = MiddlewareChain::new(Arc::new(router))
        .add_middleware(Arc::new(TimingMiddleware))
        .with_error_handler(Arc::new(ErrorPolicy::new(
            components.bot.clone(),
            app.expose_error_details,
        )))
        .add_middleware(Arc::new(LoggingForwarder::new(
            components.bot.clone(),
            admin.clone(),
        )))
        .add_middleware(Arc::new(AdminGate::new(components.bot, admin)));

    Relay::new(chain)
}

/// Runs the bot until Ctrl-C. Tracing must already be initialized.
pub async fn run(config: BotConfig) -> Result<()> {
    let llm_cfg = EnvLlmConfig::from_env()?;
    let app = AppConfig::from_env()?;

    info!(
        api_key = %mask_token(llm_cfg.api_key()),
        base_url = %llm_cfg.base_url(),
        model = %llm_cfg.model(),
        timeout_secs = llm_cfg.query_timeout().as_secs(),
        scope = ?app.generic_scope,
        admins = config.admin().admin_count(),
        log_chat = ?config.admin().log_chat(),
        admin_only = config.admin().admin_only(),
        "Starting TeleGPT"
    );
    if llm_cfg.system_prompt().is_none() {
        warn!("No SYSTEM_PROMPT/LLM_SYSTEM_PROMPT in env; using default");
    }
    if app.expose_error_details {
        warn!("EXPOSE_ERROR_DETAILS is on; raw failure descriptions will reach users");
    }

    let teloxide_bot = build_teloxide_bot(config.bot_token(), config.telegram_api_url())?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let backend: Arc<dyn ConversationClient> = Arc::new(OpenAIConversationClient::from_config(&llm_cfg));
    let client: Arc<dyn ConversationClient> =
        Arc::new(DeadlineClient::new(backend, llm_cfg.query_timeout()));
    let bot_username = Arc::new(RwLock::new(None));

    let relay = build_relay(
        Arc::new(config.admin().clone()),
        &app,
        RelayComponents {
            bot,
            client,
            sessions: Arc::new(SessionStore::new()),
            bot_username: bot_username.clone(),
        },
    );

    run_dispatcher(teloxide_bot, relay, bot_username).await
}
