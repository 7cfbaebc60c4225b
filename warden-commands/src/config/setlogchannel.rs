use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::{Error, Param};
use warden_database::model::settings::SettingsUpdate;

pub const META: CommandMeta = CommandMeta {
    name: "setlogchannel",
    desc: "Set or clear the channel moderation events are logged to.",
    category: "config",
    usage: "!setlogchannel [#channel|clear]",
    params: &[
        Param::channel("channel", "The log channel").optional(),
        Param::word("clear", "Type `clear` to stop logging").optional(),
    ],
    permission: Some(serenity::Permissions::MANAGE_GUILD),
    mod_only: false,
    guild_only: true,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let guild_id = ctx.guild_id()?;

    let update = match (ctx.args.channel("channel"), ctx.args.string("clear")) {
        (Some(channel_id), _) => Some(channel_id.get()),
        (None, Some(word)) if word.eq_ignore_ascii_case("clear") => None,
        (None, None) => {
            let settings = ctx.store.server_settings(guild_id.get()).await?;
            let message = match settings.log_channel_id {
                Some(channel_id) => format!("Moderation events are logged to <#{channel_id}>."),
                None => "No log channel is set.".to_owned(),
            };
            return ctx.say(message).await;
        }
        _ => return ctx.usage().await,
    };

    ctx.store
        .update_server_settings(
            guild_id.get(),
            SettingsUpdate {
                log_channel_id: Some(update),
                ..Default::default()
            },
        )
        .await?;

    match update {
        Some(channel_id) => {
            ctx.say(format!("Moderation events will be logged to <#{channel_id}>."))
                .await
        }
        None => ctx.say("Log channel cleared.").await,
    }
}
