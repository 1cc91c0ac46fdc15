//! User-facing texts. All are HTML.

pub const PROCESSING_NOTICE: &str = "<b>Processing</b>";

/// Edit applied to a status placeholder that could not be deleted.
pub const DONE_TEXT: &str = "Done.";

pub const START_TEXT: &str = "<b>Welcome!</b> ✨\n<i>Send any query or ask questions.</i>";

pub const HELP_TEXT: &str = "<b>TeleGPT</b>\n\n<i>This is a chat bot using OpenAI's Chat API.\nAsk any query to get started!</i>\n\n/tom - reply to a message with this to hear what Tom thinks of it";

pub const TOM_USAGE_NOTICE: &str = "<b>/tom must be used in reply to a text message.</b>";

pub const TIMEOUT_NOTICE: &str = "<b>Query timed out.</b>";

pub const PLATFORM_ERROR_NOTICE: &str = "<b>Error contacting Telegram.</b>";

pub const GENERIC_ERROR_NOTICE: &str = "<b>An error occurred.</b>";
