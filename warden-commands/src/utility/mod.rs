pub mod botinfo;
pub mod embeds;
pub mod help;
pub mod ping;
