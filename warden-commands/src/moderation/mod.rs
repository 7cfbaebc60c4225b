pub mod ban;
pub mod clearwarns;
pub mod kick;
pub mod modlogs;
pub mod modpanel;
pub mod mute;
pub mod purge;
pub mod softban;
pub mod unban;
pub mod unmute;
pub mod warn;
pub mod warnings;

pub mod embeds;
pub(crate) mod logging;
