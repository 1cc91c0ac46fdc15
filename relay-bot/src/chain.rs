//! # Middleware chain
//!
//! Runs an ordered list of stages in front of one endpoint handler. Each stage receives the update and
//! a [`Next`] continuation; a stage that returns without calling `next.run` terminates processing, so no
//! later stage and no endpoint observes the update.
//!
//! The [`ErrorHandler`] sits at the position in the stage list where it was installed: every `Err` from
//! a later stage or the endpoint is handed to it, and earlier stages (timing) see the handled outcome,
//! so they also cover the error reply. Earlier stages must not fail on their own; if one does, its error
//! is returned to the caller.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::core::{ErrorHandler, Handler, HandlerResponse, Middleware, Result, Update};

/// Continuation handed to a stage: the remaining stages plus the endpoint.
pub struct Next<'a> {
    stages: &'a [Arc<dyn Middleware>],
    endpoint: &'a dyn Handler,
    error_handler: Option<&'a dyn ErrorHandler>,
    /// Stages still to pass before the error boundary applies.
    outer: usize,
}

impl<'a> Next<'a> {
    pub fn new(stages: &'a [Arc<dyn Middleware>], endpoint: &'a dyn Handler) -> Self {
        Self {
            stages,
            endpoint,
            error_handler: None,
            outer: 0,
        }
    }

    /// Runs the next stage, or the endpoint when no stages remain.
    pub async fn run(self, update: &Update) -> Result<HandlerResponse> {
        match self.error_handler {
            Some(handler) if self.outer == 0 => {
                let guarded = Next {
                    error_handler: None,
                    ..self
                };
                match guarded.step(update).await {
                    Err(e) => {
                        warn!(chat_id = update.chat.id, kind = %e.kind(), error = %e, "step: chain error, handing to error handler");
                        handler.handle_error(update, e).await
                    }
                    handled => handled,
                }
            }
            _ => self.step(update).await,
        }
    }

    async fn step(self, update: &Update) -> Result<HandlerResponse> {
        match self.stages.split_first() {
            Some((stage, rest)) => {
                let name = std::any::type_name_of_val(stage.as_ref());
                debug!(chat_id = update.chat.id, stage = %name, "step: middleware enter");
                let next = Next {
                    stages: rest,
                    endpoint: self.endpoint,
                    error_handler: self.error_handler,
                    outer: self.outer.saturating_sub(1),
                };
                stage.handle(update, next).await
            }
            None => {
                debug!(chat_id = update.chat.id, "step: endpoint handle");
                self.endpoint.handle(update).await
            }
        }
    }
}

/// Ordered stages wrapping an endpoint, with a single error boundary.
#[derive(Clone)]
pub struct MiddlewareChain {
    stages: Vec<Arc<dyn Middleware>>,
    endpoint: Arc<dyn Handler>,
    error_handler: Option<Arc<dyn ErrorHandler>>,
    /// Number of stages in front of the error boundary.
    boundary_at: usize,
}

impl MiddlewareChain {
    /// Creates a chain with no stages in front of `endpoint`.
    pub fn new(endpoint: Arc<dyn Handler>) -> Self {
        Self {
            stages: Vec::new(),
            endpoint,
            error_handler: None,
            boundary_at: 0,
        }
    }

    /// Appends a stage; stages run in insertion order.
    pub fn add_middleware(mut self, stage: Arc<dyn Middleware>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Installs the error boundary after the stages added so far; it handles errors from every stage
    /// added later and from the endpoint.
    pub fn with_error_handler(mut self, handler: Arc<dyn ErrorHandler>) -> Self {
        self.error_handler = Some(handler);
        self.boundary_at = self.stages.len();
        self
    }

    /// Runs the update through every stage and the endpoint.
    #[instrument(skip(self, update), fields(chat_id = update.chat.id, message_id = update.message_id))]
    pub async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        info!(
            chat_id = update.chat.id,
            user_id = update.sender_id(),
            "step: middleware_chain started"
        );

        let result = Next {
            stages: &self.stages,
            endpoint: self.endpoint.as_ref(),
            error_handler: self.error_handler.as_deref(),
            outer: self.boundary_at,
        }
        .run(update)
        .await;

        match &result {
            Ok(response) => {
                let (response_type, reply_len) = match response {
                    HandlerResponse::Continue => ("Continue", None),
                    HandlerResponse::Stop => ("Stop", None),
                    HandlerResponse::Ignore => ("Ignore", None),
                    HandlerResponse::Reply(s) => ("Reply", Some(s.len())),
                };
                info!(
                    chat_id = update.chat.id,
                    response_type = %response_type,
                    reply_len = ?reply_len,
                    "step: middleware_chain finished"
                );
            }
            Err(e) => {
                warn!(chat_id = update.chat.id, error = %e, "step: middleware_chain failed");
            }
        }

        result
    }
}

// Integration tests live in tests/chain_test.rs
