use crate::CommandMeta;

pub fn unknown_category_message(wanted_category: &str, valid_categories: &[&str]) -> String {
    let valid = valid_categories
        .iter()
        .map(|category| display_category(category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Unknown category: {}\nValid categories: {}",
        display_category(wanted_category),
        valid
    )
}

/// Commands must already be sorted by category.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("`{}`: {}\n", command.name, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{grouped_help_description, unknown_category_message};
    use crate::COMMANDS;

    #[test]
    fn groups_commands_under_category_headers() {
        let ban = COMMANDS.iter().find(|meta| meta.name == "ban").expect("ban");
        let kick = COMMANDS.iter().find(|meta| meta.name == "kick").expect("kick");
        let ping = COMMANDS.iter().find(|meta| meta.name == "ping").expect("ping");

        let description = grouped_help_description(&[ban, kick, ping]);
        assert!(description.starts_with("**Moderation**\n`ban`:"));
        assert!(description.contains("\n\n**Utility**\n`ping`: Replies with Pong!"));
    }

    #[test]
    fn unknown_category_lists_valid_ones() {
        assert_eq!(
            unknown_category_message("fun", &["economy", "utility"]),
            "Unknown category: Fun\nValid categories: Economy, Utility"
        );
    }
}
