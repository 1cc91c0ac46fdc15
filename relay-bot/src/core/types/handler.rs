//! Handler, middleware and error-handler traits plus transport conversion traits.

use async_trait::async_trait;

use super::{response::HandlerResponse, update::Update, user::User};
use crate::chain::Next;
use crate::core::error::{RelayError, Result};

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Update`].
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Update;
}

/// Terminal handler at the end of the middleware chain.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse>;
}

/// One chain stage. Call `next.run(update)` to continue; returning without it short-circuits the chain.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn handle(&self, update: &Update, next: Next<'_>) -> Result<HandlerResponse>;
}

/// Receives any error raised by a stage or the endpoint and decides the user-visible outcome.
#[async_trait]
pub trait ErrorHandler: Send + Sync {
    async fn handle_error(&self, update: &Update, error: RelayError) -> Result<HandlerResponse>;
}
