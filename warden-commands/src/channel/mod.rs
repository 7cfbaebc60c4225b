pub mod lock;
pub mod slowmode;
pub mod unlock;

use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::context::CommandContext;
use warden_database::model::settings::ChannelSettingsUpdate;

/// Mirror the channel's state in storage. The platform is authoritative, so a
/// failed write only gets logged.
pub(crate) async fn remember_channel_state(
    ctx: &CommandContext,
    guild_id: serenity::GuildId,
    update: ChannelSettingsUpdate,
) {
    let channel_id = ctx.channel_id();
    if let Err(source) = ctx
        .store
        .update_channel_settings(guild_id.get(), channel_id.get(), update)
        .await
    {
        warn!(?source, channel_id = channel_id.get(), "failed to persist channel settings");
    }
}
