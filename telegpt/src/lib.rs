//! # telegpt
//!
//! Telegram chat relay to an OpenAI-compatible model. Every update runs, one at a time per chat, through
//! timing, logging/forwarding and the admin gate, then the [`CommandRouter`]: `/start`, `/help`, `/tom`
//! (persona reply to a quoted message) or the generic conversation handler. Failures are classified by
//! [`ErrorPolicy`].

mod assembly;
pub mod commands;
pub mod config;
pub mod error_policy;
pub mod handlers;
pub mod messages;
pub mod router;
pub mod session;
pub mod status;

pub use assembly::{build_relay, run, RelayComponents};
pub use commands::{parse_command, Command, ParsedCommand};
pub use config::{AppConfig, GenericScope};
pub use error_policy::{relay_error, ErrorPolicy};
pub use handlers::{persona_prompt, split_reply, MAX_MESSAGE_CHARS};
pub use router::CommandRouter;
pub use session::SessionStore;
pub use status::StatusMessage;
