//! Chain stages, in the order they are meant to be installed: timing, logging/forwarding, admin gate.

mod auth;
mod logging;
mod timing;

pub use auth::{AdminGate, ACCESS_DENIED_NOTICE};
pub use logging::{forward_header, LoggingForwarder};
pub use timing::TimingMiddleware;
