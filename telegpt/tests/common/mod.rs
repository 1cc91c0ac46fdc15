//! Shared fixtures for telegpt integration tests: update builders, a mocked conversation client and a
//! relay assembled around a recording bot.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use conversation_client::{ConversationClient, ConversationRequest, ConversationResponse};
use mockall::mock;
use relay_bot::testing::RecordingBot;
use relay_bot::{AdminConfig, Bot, Chat, ChatKind, Relay, RepliedMessage, Update, User};
use telegpt::{build_relay, AppConfig, RelayComponents, SessionStore};
use tokio::sync::RwLock;

pub const BOT_USERNAME: &str = "TeleGPT_bot";
pub const LOG_CHAT: i64 = -900;

mock! {
    pub Client {}

    #[async_trait]
    impl ConversationClient for Client {
        async fn send(&self, request: ConversationRequest) -> conversation_client::Result<ConversationResponse>;
    }
}

/// Never answers; only a deadline gets the caller out.
pub struct HangingClient;

#[async_trait]
impl ConversationClient for HangingClient {
    async fn send(&self, _request: ConversationRequest) -> conversation_client::Result<ConversationResponse> {
        std::future::pending().await
    }
}

pub fn reply(text: &str, conversation_id: &str, message_id: &str) -> ConversationResponse {
    ConversationResponse {
        text: text.to_string(),
        conversation_id: conversation_id.to_string(),
        message_id: message_id.to_string(),
        usage: None,
    }
}

pub fn private_text(chat_id: i64, message_id: i32, text: &str) -> Update {
    Update {
        message_id,
        chat: Chat {
            id: chat_id,
            kind: ChatKind::Private,
            title: None,
        },
        user: Some(User {
            id: chat_id,
            username: Some("ada".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: None,
        }),
        text: Some(text.to_string()),
        reply_to: None,
        received_at: Utc::now(),
    }
}

pub fn group_text(chat_id: i64, message_id: i32, text: &str) -> Update {
    Update {
        message_id,
        chat: Chat {
            id: chat_id,
            kind: ChatKind::Group,
            title: Some("Lunch".to_string()),
        },
        user: Some(User {
            id: 77,
            username: None,
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
        }),
        text: Some(text.to_string()),
        reply_to: None,
        received_at: Utc::now(),
    }
}

pub fn replying_to(mut update: Update, message_id: i32, text: Option<&str>) -> Update {
    update.reply_to = Some(RepliedMessage {
        message_id,
        text: text.map(str::to_string),
    });
    update
}

pub struct Harness {
    pub bot: Arc<RecordingBot>,
    pub relay: Relay,
    pub sessions: Arc<SessionStore>,
}

pub struct HarnessBuilder {
    admin: AdminConfig,
    app: AppConfig,
    username: Option<String>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            admin: AdminConfig::default(),
            app: AppConfig::default(),
            username: Some(BOT_USERNAME.to_string()),
        }
    }

    pub fn admin(mut self, admin: AdminConfig) -> Self {
        self.admin = admin;
        self
    }

    pub fn app(mut self, app: AppConfig) -> Self {
        self.app = app;
        self
    }

    pub fn build(self, client: impl ConversationClient + 'static) -> Harness {
        let bot = Arc::new(RecordingBot::new());
        let sessions = Arc::new(SessionStore::new());
        let relay = build_relay(
            Arc::new(self.admin),
            &self.app,
            RelayComponents {
                bot: bot.clone() as Arc<dyn Bot>,
                client: Arc::new(client),
                sessions: sessions.clone(),
                bot_username: Arc::new(RwLock::new(self.username)),
            },
        );
        Harness {
            bot,
            relay,
            sessions,
        }
    }
}
