//! Command and text handlers dispatched by [`crate::CommandRouter`].

mod generic;
mod info;
mod persona;

pub use generic::GenericTextHandler;
pub use info::{reply_help, reply_start};
pub use persona::{persona_prompt, PersonaHandler};

use relay_bot::{Bot, MessageRef, Result, SendOptions, TextFormat};

/// Longest text Telegram accepts in one message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Splits `text` into chunks of at most `limit` characters, preferring to break after a newline.
pub fn split_reply(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while rest.chars().count() > limit {
        let hard_end = rest
            .char_indices()
            .nth(limit)
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let end = match rest[..hard_end].rfind('\n') {
            Some(nl) if nl > 0 => nl + 1,
            _ => hard_end,
        };
        chunks.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest.to_string());
    }
    chunks
}

/// Sends plain-text `text` into `chat_id`, the first chunk linked as a reply to `reply_to`.
///
/// `on_first_delivered` runs once the first chunk is accepted, before any later chunk is attempted.
pub(crate) async fn send_plain_reply(
    bot: &dyn Bot,
    chat_id: i64,
    reply_to: i32,
    text: &str,
    on_first_delivered: impl FnOnce(),
) -> Result<Vec<MessageRef>> {
    let mut on_first_delivered = Some(on_first_delivered);
    let mut sent = Vec::new();
    for (i, chunk) in split_reply(text, MAX_MESSAGE_CHARS).iter().enumerate() {
        let options = SendOptions {
            reply_to: (i == 0).then_some(reply_to),
            format: TextFormat::Plain,
        };
        sent.push(bot.send_message(chat_id, chunk, options).await?);
        if let Some(delivered) = on_first_delivered.take() {
            delivered();
        }
    }
    Ok(sent)
}
