//! # Relay bot framework
//!
//! Transport-agnostic core (Update, Bot, Handler, Middleware), the middleware chain with its error
//! boundary, per-conversation sequential dispatch, the timing / logging-forwarding / admin-gate stages,
//! the teloxide transport and configuration.

pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod dispatcher;
pub mod middleware;
pub mod relay;
pub mod session;
pub mod telegram;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use cli::{load_config, Cli, Commands};

pub use core::{
    init_tracing, Bot, Chat, ChatKind, ErrorHandler, ErrorKind, ErrorRecord, Handler,
    HandlerResponse, MessageRef, Middleware, RelayError, RepliedMessage, Result, SendOptions,
    TextFormat, ToCoreUpdate, ToCoreUser, Update, User,
};

pub use chain::{MiddlewareChain, Next};
pub use config::{parse_flag, AdminConfig, BaseConfig, BotConfig};
pub use dispatcher::SequentialDispatcher;
pub use middleware::{forward_header, AdminGate, LoggingForwarder, TimingMiddleware, ACCESS_DENIED_NOTICE};
pub use relay::Relay;
pub use session::{session_key, ConversationKey};
pub use telegram::{
    build_teloxide_bot, fetch_bot_username, map_request_error, run_dispatcher, TelegramBotAdapter,
    TelegramMessageWrapper, TelegramUserWrapper,
};
