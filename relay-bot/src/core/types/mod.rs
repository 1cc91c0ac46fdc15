//! Core types: user, chat, update, message handles, handler response and the handler/middleware traits.

mod chat;
mod handler;
mod response;
mod update;
mod user;

pub use chat::{Chat, ChatKind};
pub use handler::{ErrorHandler, Handler, Middleware, ToCoreUpdate, ToCoreUser};
pub use response::HandlerResponse;
pub use update::{MessageRef, RepliedMessage, Update};
pub use user::User;
