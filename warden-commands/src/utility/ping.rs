use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::Error;

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Replies with Pong!",
    category: "utility",
    usage: "!ping",
    params: &[],
    permission: None,
    mod_only: false,
    guild_only: false,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    ctx.say("Pong!").await
}
