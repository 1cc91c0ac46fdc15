//! Ties the dispatcher to the middleware chain: every update is admitted under its conversation key and
//! run through the chain while holding that key's turn.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::chain::MiddlewareChain;
use crate::core::{HandlerResponse, Result, Update};
use crate::dispatcher::SequentialDispatcher;
use crate::session::session_key;

/// Entry point for inbound updates.
#[derive(Clone)]
pub struct Relay {
    chain: Arc<MiddlewareChain>,
    dispatcher: SequentialDispatcher,
}

impl Relay {
    pub fn new(chain: MiddlewareChain) -> Self {
        Self {
            chain: Arc::new(chain),
            dispatcher: SequentialDispatcher::new(),
        }
    }

    pub fn dispatcher(&self) -> &SequentialDispatcher {
        &self.dispatcher
    }

    /// Admits `update` and waits for its chain run. Errors that escaped the chain's error handler are logged.
    pub async fn process(&self, update: Update) {
        let chat_id = update.chat.id;
        let message_id = update.message_id;
        match self.submit(update).await {
            Ok(response) => debug!(chat_id, message_id, response = ?response, "step: update done"),
            Err(e) => error!(
                chat_id,
                message_id,
                kind = %e.kind(),
                error = %e,
                "Update processing failed"
            ),
        }
    }

    /// Admits `update` immediately and returns a future for its chain result.
    pub fn submit(&self, update: Update) -> impl std::future::Future<Output = Result<HandlerResponse>> {
        let key = session_key(&update);
        info!(key = %key, message_id = update.message_id, "step: admitting update");
        let chain = Arc::clone(&self.chain);
        let admitted = self
            .dispatcher
            .admit(key, async move { chain.handle(&update).await });
        async move { admitted.await? }
    }
}
