//! Core types and traits: Update, Bot, Handler, Middleware, HandlerResponse, error, logger.
//! Transport-agnostic.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, SendOptions, TextFormat};
pub use error::{ErrorKind, ErrorRecord, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, ChatKind, ErrorHandler, Handler, HandlerResponse, Middleware, MessageRef, RepliedMessage,
    ToCoreUpdate, ToCoreUser, Update, User,
};
