/// Convert internal action identifiers to user-facing names.
pub fn action_display_name(action: &str) -> String {
    match action {
        "ban" => "Ban".to_owned(),
        "unban" => "Unban".to_owned(),
        "kick" => "Kick".to_owned(),
        "softban" => "Softban".to_owned(),
        "unmute" => "Unmute".to_owned(),
        "purge" => "Purge".to_owned(),
        "lock" => "Lock".to_owned(),
        "unlock" => "Unlock".to_owned(),
        "slowmode" => "Slowmode".to_owned(),
        "giverole" => "Give Role".to_owned(),
        "removerole" => "Remove Role".to_owned(),
        "clearwarns" => "Clear Warnings".to_owned(),
        other => {
            let normalized = other.trim();
            if normalized.is_empty() {
                return "Unknown".to_owned();
            }

            normalized
                .split('_')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let mut chars = part.chars();
                    match chars.next() {
                        Some(first) => {
                            format!(
                                "{}{}",
                                first.to_uppercase(),
                                chars.as_str().to_ascii_lowercase()
                            )
                        }
                        None => String::new(),
                    }
                })
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

/// Format seconds into a compact human-readable duration (e.g. 59s, 1m, 1h, 1d, 1h 30m).
pub fn format_compact_duration(total_seconds: u64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        return if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        };
    }

    if hours > 0 {
        let mut parts = vec![format!("{}h", hours)];
        if minutes > 0 {
            parts.push(format!("{}m", minutes));
        }
        if seconds > 0 {
            parts.push(format!("{}s", seconds));
        }
        return parts.join(" ");
    }

    if minutes > 0 {
        return if seconds > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}m", minutes)
        };
    }

    format!("{}s", seconds)
}

/// Break user-supplied text so it can't ping anyone when echoed back.
pub fn escape_mentions(text: &str) -> String {
    text.replace('@', "@\u{200B}")
}

/// Discord relative timestamp markup.
pub fn relative_timestamp(unix_secs: u64) -> String {
    format!("<t:{}:R>", unix_secs)
}

#[cfg(test)]
mod tests {
    use super::{action_display_name, escape_mentions, format_compact_duration};

    #[test]
    fn action_names_are_user_friendly() {
        assert_eq!(action_display_name("ban"), "Ban");
        assert_eq!(action_display_name("giverole"), "Give Role");
        assert_eq!(action_display_name("clearwarns"), "Clear Warnings");
        assert_eq!(action_display_name("custom_action"), "Custom Action");
        assert_eq!(action_display_name("  "), "Unknown");
    }

    #[test]
    fn compact_duration_formatting() {
        assert_eq!(format_compact_duration(59), "59s");
        assert_eq!(format_compact_duration(60), "1m");
        assert_eq!(format_compact_duration(61), "1m 1s");
        assert_eq!(format_compact_duration(3600), "1h");
        assert_eq!(format_compact_duration(3660), "1h 1m");
        assert_eq!(format_compact_duration(3670), "1h 1m 10s");
        assert_eq!(format_compact_duration(86400), "1d");
        assert_eq!(format_compact_duration(90000), "1d 1h");
    }

    #[test]
    fn escapes_mentions() {
        assert_eq!(escape_mentions("@everyone"), "@\u{200B}everyone");
        assert_eq!(escape_mentions("plain"), "plain");
    }
}
