use std::sync::LazyLock;
use std::time::Instant;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::Error;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};
use warden_utils::formatting::format_compact_duration;

pub const META: CommandMeta = CommandMeta {
    name: "botinfo",
    desc: "Show uptime and other bot statistics.",
    category: "utility",
    usage: "!botinfo",
    params: &[],
    permission: None,
    mod_only: false,
    guild_only: false,
};

static STARTED_AT: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Pin the uptime origin. Call once at startup.
pub fn mark_started() {
    LazyLock::force(&STARTED_AT);
}

pub fn uptime_secs() -> u64 {
    STARTED_AT.elapsed().as_secs()
}

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let embed = ReplyEmbed::new("Bot info", "")
        .color(INFO_COLOR)
        .field("Uptime", format_compact_duration(uptime_secs()), true)
        .field("Commands", ctx.registry.len().to_string(), true)
        .field("Servers", ctx.platform.guild_count().to_string(), true)
        .field("Version", env!("CARGO_PKG_VERSION"), true);

    ctx.send_embed(embed).await
}
