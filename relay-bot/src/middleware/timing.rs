//! Response-time stage.

use std::time::Instant;

use async_trait::async_trait;
use tracing::info;

use crate::chain::Next;
use crate::core::{HandlerResponse, Middleware, Result, Update};

/// Logs wall time spent in everything downstream, including failures. Install it in front of the chain's
/// error handler to include error replies. Always continues.
pub struct TimingMiddleware;

#[async_trait]
impl Middleware for TimingMiddleware {
    async fn handle(&self, update: &Update, next: Next<'_>) -> Result<HandlerResponse> {
        let started = Instant::now();
        let result = next.run(update).await;
        info!(
            chat_id = update.chat.id,
            message_id = update.message_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Response time"
        );
        result
    }
}
