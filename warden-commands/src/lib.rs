pub mod channel;
pub mod config;
pub mod context;
pub mod cooldown;
pub mod dispatcher;
pub mod economy;
pub mod leveling;
pub mod moderation;
pub mod permissions;
pub mod registry;
pub mod roles;
pub mod utility;

use poise::serenity_prelude as serenity;

use warden_core::{Error, Param};

pub use context::CommandContext;
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use registry::{Command, Handler, Registry};

#[derive(Clone, Copy, Debug)]
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
    pub params: &'static [Param],
    /// Guild permission the invoker must hold.
    pub permission: Option<serenity::Permissions>,
    /// Gate on the guild's configured moderator roles.
    pub mod_only: bool,
    pub guild_only: bool,
}

macro_rules! command_table {
    ($($($segment:ident)::+),* $(,)?) => {
        pub const COMMANDS: &[CommandMeta] = &[$($($segment)::+::META),*];

        /// Every built-in command, ready for the dispatcher.
        pub fn registry() -> Registry {
            let mut registry = Registry::new();
            $(
                registry.register(
                    $($segment)::+::META,
                    |ctx| -> poise::BoxFuture<'static, Result<(), Error>> {
                        Box::pin($($segment)::+::run(ctx))
                    },
                );
            )*
            registry
        }
    };
}

command_table![
    utility::help,
    utility::ping,
    utility::botinfo,
    moderation::ban,
    moderation::unban,
    moderation::kick,
    moderation::softban,
    moderation::warn,
    moderation::warnings,
    moderation::clearwarns,
    moderation::mute,
    moderation::unmute,
    moderation::purge,
    moderation::modlogs,
    moderation::modpanel,
    channel::lock,
    channel::unlock,
    channel::slowmode,
    roles::giverole,
    roles::removerole,
    roles::roleinfo,
    roles::autorole,
    roles::reactionrole,
    config::setmodrole,
    config::removemodrole,
    config::listmodroles,
    config::setlogchannel,
    config::settings,
    config::togglemodule,
    economy::balance,
    economy::daily,
    economy::deposit,
    economy::withdraw,
    economy::shop,
    economy::additem,
    economy::removeitem,
    economy::buy,
    leveling::rank,
    leveling::levels,
    leveling::setlevel,
];
