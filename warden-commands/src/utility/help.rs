use crate::CommandMeta;
use crate::context::CommandContext;
use crate::utility::embeds::{display_category, grouped_help_description, unknown_category_message};
use warden_core::{Error, Param};
use warden_utils::COMMAND_PREFIX;
use warden_utils::embed::ReplyEmbed;

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [category|command]",
    params: &[Param::word("query", "Category or command name").optional()],
    permission: None,
    mod_only: false,
    guild_only: false,
};

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    let query = ctx.args.string("query").map(str::to_lowercase);
    let categories = ctx.registry.categories();

    if let Some(query) = query.as_deref()
        && let Some(command) = ctx.registry.get(query)
    {
        return ctx.send_embed(command_help(&command.meta)).await;
    }

    if let Some(wanted) = query.as_deref()
        && !categories.contains(&wanted)
    {
        return ctx.say(unknown_category_message(wanted, &categories)).await;
    }

    let commands = ctx
        .registry
        .sorted()
        .into_iter()
        .map(|command| &command.meta)
        .filter(|meta| query.as_deref().is_none_or(|wanted| meta.category == wanted))
        .collect::<Vec<_>>();

    let title = match query.as_deref() {
        Some(category) => format!("{} Commands", display_category(category)),
        None => "Available Commands".to_owned(),
    };

    let embed = ReplyEmbed::new(title, grouped_help_description(&commands)).footer(format!(
        "Use {COMMAND_PREFIX}help <command> for details."
    ));
    ctx.send_embed(embed).await
}

fn command_help(meta: &CommandMeta) -> ReplyEmbed {
    let mut embed = ReplyEmbed::new(format!("{COMMAND_PREFIX}{}", meta.name), meta.desc)
        .field("Usage", format!("`{}`", meta.usage), false)
        .field("Category", display_category(meta.category), true);

    if let Some(permission) = meta.permission {
        embed = embed.field(
            "Requires",
            warden_utils::permissions::permission_names(permission).join(", "),
            true,
        );
    }
    if meta.mod_only {
        embed = embed.field("Moderator role", "Required when configured", true);
    }

    embed
}
