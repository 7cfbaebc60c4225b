const MINUTE_MS: u64 = 60 * 1000;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Parse a duration token like `30m`, `2h`, or `7d` into milliseconds.
///
/// Only a run of ASCII digits followed by exactly one of `m`, `h`, `d` is
/// accepted. Anything else, including values that overflow, yields `None`.
pub fn parse_duration_ms(raw: &str) -> Option<u64> {
    let (amount, unit) = split_duration_token(raw)?;
    amount.checked_mul(unit_factor_ms(unit)?)
}

/// Split a duration token into its amount and unit without converting it.
pub fn split_duration_token(raw: &str) -> Option<(u64, char)> {
    let unit = raw.chars().last()?;
    unit_factor_ms(unit)?;

    let digits = &raw[..raw.len() - unit.len_utf8()];
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    let amount = digits.parse::<u64>().ok()?;
    Some((amount, unit))
}

/// Inverse of [`split_duration_token`].
pub fn format_duration_token(amount: u64, unit: char) -> String {
    format!("{amount}{unit}")
}

fn unit_factor_ms(unit: char) -> Option<u64> {
    match unit {
        'm' => Some(MINUTE_MS),
        'h' => Some(HOUR_MS),
        'd' => Some(DAY_MS),
        _ => None,
    }
}

/// Parse `<@123>`, `<@!123>`, or a bare id.
pub fn parse_user_mention(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix("<@").and_then(|rest| rest.strip_suffix('>')) {
        if inner.starts_with('&') {
            return None;
        }
        return parse_snowflake(inner.trim_start_matches('!'));
    }

    parse_snowflake(raw)
}

/// Parse `<@&123>` or a bare id.
pub fn parse_role_mention(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix("<@&").and_then(|rest| rest.strip_suffix('>')) {
        return parse_snowflake(inner);
    }

    parse_snowflake(raw)
}

/// Parse `<#123>` or a bare id.
pub fn parse_channel_mention(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if let Some(inner) = raw.strip_prefix("<#").and_then(|rest| rest.strip_suffix('>')) {
        return parse_snowflake(inner);
    }

    parse_snowflake(raw)
}

/// Parse a positive Discord id.
pub fn parse_snowflake(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    raw.parse::<u64>().ok().filter(|id| *id > 0)
}
