/// Reply and embed model shared by handlers and the platform layer.
pub mod embed;
/// Shared formatting helpers (action names, durations, mention escaping).
pub mod formatting;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Shared time helpers.
pub mod time;
