//! Handler chain result type.

/// Result of running an update through the chain. `Reply(text)` carries the response body that was relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Nothing consumed the update.
    Continue,
    /// A stage or handler terminated processing (short-circuit, notice sent, or error handled).
    Stop,
    /// The update is outside this handler's scope and was deliberately left alone.
    Ignore,
    /// The update was answered with this text.
    Reply(String),
}
