use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x2B_2D_31;
pub const ERROR_COLOR: u32 = 0xED_42_45;
pub const SUCCESS_COLOR: u32 = 0x57_F2_87;
pub const WARNING_COLOR: u32 = 0xE6_7E_22;
pub const NOTICE_COLOR: u32 = 0xFE_E7_5C;
pub const INFO_COLOR: u32 = 0x34_98_DB;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Platform-independent embed description.
///
/// Handlers build these so replies can be inspected without a gateway; the
/// platform layer converts them with [`ReplyEmbed::to_create_embed`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: bool,
}

impl ReplyEmbed {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            color: DEFAULT_EMBED_COLOR,
            fields: Vec::new(),
            footer: None,
            timestamp: false,
        }
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.footer = Some(text.into());
        self
    }

    pub fn timestamp(mut self) -> Self {
        self.timestamp = true;
        self
    }

    pub fn to_create_embed(&self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new()
            .title(self.title.clone())
            .color(self.color);

        if !self.description.is_empty() {
            embed = embed.description(self.description.clone());
        }

        for field in &self.fields {
            embed = embed.field(field.name.clone(), field.value.clone(), field.inline);
        }

        if let Some(footer) = self.footer.as_deref() {
            embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
        }

        if self.timestamp {
            embed = embed.timestamp(serenity::Timestamp::now());
        }

        embed
    }
}

/// A reply to an invocation, or a standalone message to a channel.
///
/// `ephemeral` only has an effect on interaction responses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub content: Option<String>,
    pub embed: Option<ReplyEmbed>,
    pub ephemeral: bool,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: ReplyEmbed) -> Self {
        Self {
            embed: Some(embed),
            ..Default::default()
        }
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Flatten every visible piece of text into one string.
    pub fn plain_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(content) = self.content.as_deref() {
            parts.push(content.to_owned());
        }

        if let Some(embed) = &self.embed {
            parts.push(embed.title.clone());
            parts.push(embed.description.clone());
            for field in &embed.fields {
                parts.push(format!("{}: {}", field.name, field.value));
            }
            if let Some(footer) = embed.footer.as_deref() {
                parts.push(footer.to_owned());
            }
        }

        parts.retain(|part| !part.is_empty());
        parts.join("\n")
    }
}

pub fn error_embed(description: impl Into<String>) -> ReplyEmbed {
    ReplyEmbed::new("❌ Error", description).color(ERROR_COLOR)
}

pub fn permission_denied_embed(description: impl Into<String>) -> ReplyEmbed {
    ReplyEmbed::new("❌ Permission Denied", description).color(ERROR_COLOR)
}

#[cfg(test)]
mod tests {
    use super::{ERROR_COLOR, Reply, ReplyEmbed, error_embed};

    #[test]
    fn plain_text_includes_every_part() {
        let reply = Reply::embed(
            ReplyEmbed::new("Title", "Body")
                .field("Member", "<@1>", true)
                .footer("Footer"),
        );

        assert_eq!(reply.plain_text(), "Title\nBody\nMember: <@1>\nFooter");
    }

    #[test]
    fn error_embeds_are_red() {
        let embed = error_embed("nope");
        assert_eq!(embed.color, ERROR_COLOR);
        assert_eq!(embed.title, "❌ Error");
    }

    #[test]
    fn text_replies_are_not_ephemeral_by_default() {
        assert!(!Reply::text("hi").ephemeral);
        assert!(Reply::text("hi").ephemeral().ephemeral);
    }
}
