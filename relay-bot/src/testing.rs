//! Recording [`Bot`] for tests: every call is captured; individual methods can be made to fail.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::{Bot, MessageRef, RelayError, Result, SendOptions};

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send {
        chat_id: i64,
        text: String,
        options: SendOptions,
        sent: MessageRef,
    },
    Forward {
        to_chat_id: i64,
        source: MessageRef,
    },
    Delete(MessageRef),
    Edit {
        message: MessageRef,
        text: String,
    },
}

/// Which Bot method a failure applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotMethod {
    Send,
    Forward,
    Delete,
    Edit,
}

impl BotMethod {
    fn api_name(&self) -> &'static str {
        match self {
            BotMethod::Send => "sendMessage",
            BotMethod::Forward => "forwardMessage",
            BotMethod::Delete => "deleteMessage",
            BotMethod::Edit => "editMessageText",
        }
    }
}

/// How a failing method fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Unreachable,
    Platform,
}

impl Failure {
    fn into_error(self, method: BotMethod) -> RelayError {
        let method = method.api_name().to_string();
        match self {
            Failure::Unreachable => RelayError::RecipientUnreachable {
                method,
                message: "Forbidden: bot was blocked by the user".to_string(),
            },
            Failure::Platform => RelayError::Platform {
                method,
                message: "connection reset".to_string(),
            },
        }
    }
}

/// Bot that records calls instead of talking to a platform. Sent messages get increasing ids from 1000.
#[derive(Default)]
pub struct RecordingBot {
    calls: Mutex<Vec<BotCall>>,
    failures: Mutex<HashMap<BotMethod, Failure>>,
    nth_failures: Mutex<HashMap<(BotMethod, usize), Failure>>,
    attempts: Mutex<HashMap<BotMethod, usize>>,
    next_id: AtomicI32,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI32::new(1000),
            ..Default::default()
        }
    }

    /// Makes every later call to `method` fail with `failure`. Failed calls are not recorded.
    pub fn fail(&self, method: BotMethod, failure: Failure) {
        self.failures.lock().unwrap().insert(method, failure);
    }

    /// Makes only the `n`th call (1-based, counting failed attempts) to `method` fail with `failure`.
    pub fn fail_nth(&self, method: BotMethod, n: usize, failure: Failure) {
        self.nth_failures.lock().unwrap().insert((method, n), failure);
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Texts of all sent messages, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Sent messages addressed to `chat_id`.
    pub fn sends_to(&self, chat_id: i64) -> Vec<BotCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, BotCall::Send { chat_id: id, .. } if *id == chat_id))
            .collect()
    }

    pub fn forwards(&self) -> Vec<BotCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, BotCall::Forward { .. }))
            .collect()
    }

    fn check(&self, method: BotMethod) -> Result<()> {
        let attempt = {
            let mut attempts = self.attempts.lock().unwrap();
            let count = attempts.entry(method).or_insert(0);
            *count += 1;
            *count
        };
        let failure = self
            .failures
            .lock()
            .unwrap()
            .get(&method)
            .copied()
            .or_else(|| self.nth_failures.lock().unwrap().get(&(method, attempt)).copied());
        match failure {
            Some(failure) => Err(failure.into_error(method)),
            None => Ok(()),
        }
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, chat_id: i64, text: &str, options: SendOptions) -> Result<MessageRef> {
        self.check(BotMethod::Send)?;
        let sent = MessageRef {
            chat_id,
            message_id: self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        self.record(BotCall::Send {
            chat_id,
            text: text.to_string(),
            options,
            sent,
        });
        Ok(sent)
    }

    async fn forward(&self, to_chat_id: i64, source: MessageRef) -> Result<MessageRef> {
        self.check(BotMethod::Forward)?;
        self.record(BotCall::Forward { to_chat_id, source });
        Ok(MessageRef {
            chat_id: to_chat_id,
            message_id: self.next_id.fetch_add(1, Ordering::SeqCst),
        })
    }

    async fn delete_message(&self, message: MessageRef) -> Result<()> {
        self.check(BotMethod::Delete)?;
        self.record(BotCall::Delete(message));
        Ok(())
    }

    async fn edit_message(&self, message: MessageRef, text: &str) -> Result<()> {
        self.check(BotMethod::Edit)?;
        self.record(BotCall::Edit {
            message,
            text: text.to_string(),
        });
        Ok(())
    }
}
