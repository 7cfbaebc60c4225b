use poise::serenity_prelude as serenity;

use crate::CommandMeta;
use crate::context::CommandContext;
use crate::registry::Registry;
use warden_core::Error;
use warden_utils::COMMAND_PREFIX;
use warden_utils::embed::{INFO_COLOR, ReplyEmbed};

pub const META: CommandMeta = CommandMeta {
    name: "modpanel",
    desc: "Display the moderation command panel.",
    category: "moderation",
    usage: "!modpanel",
    params: &[],
    permission: Some(serenity::Permissions::MODERATE_MEMBERS),
    mod_only: true,
    guild_only: true,
};

const SECTIONS: &[(&str, &[&str])] = &[
    ("👢 Member Management", &["kick", "ban", "softban", "unban"]),
    ("🔇 Mute Controls", &["mute", "unmute"]),
    ("⚠️ Warning System", &["warn", "warnings", "clearwarns"]),
    ("📝 Logs", &["modlogs"]),
    ("🧹 Channel Management", &["purge", "lock", "unlock", "slowmode"]),
    ("🎭 Roles", &["giverole", "removerole", "roleinfo"]),
];

pub async fn run(ctx: CommandContext) -> Result<(), Error> {
    ctx.send_embed(panel_embed(&ctx.registry)).await
}

pub fn panel_embed(registry: &Registry) -> ReplyEmbed {
    let mut embed = ReplyEmbed::new(
        "🛡️ Moderation Panel",
        "Quick access to all moderation commands",
    )
    .color(INFO_COLOR)
    .footer("Use these commands responsibly!");

    for (title, names) in SECTIONS {
        let lines = names
            .iter()
            .filter_map(|name| registry.get(name))
            .map(|command| format!("`{COMMAND_PREFIX}{}` - {}", command.meta.name, command.meta.desc))
            .collect::<Vec<_>>();

        if !lines.is_empty() {
            embed = embed.field(*title, lines.join("\n"), false);
        }
    }

    embed
}

#[cfg(test)]
mod tests {
    use super::panel_embed;
    use crate::registry;

    #[test]
    fn panel_lists_registered_moderation_commands() {
        let embed = panel_embed(&registry());

        assert_eq!(embed.fields.len(), 6);
        let members = &embed.fields[0];
        assert_eq!(members.name, "👢 Member Management");
        assert!(members.value.starts_with("`!kick` - "));
        assert!(members.value.contains("`!softban` - "));
    }

    #[test]
    fn missing_commands_are_left_out() {
        let embed = panel_embed(&crate::Registry::new());
        assert!(embed.fields.is_empty());
    }
}
