mod config;
mod data;
mod events;
mod registration;

use std::sync::Arc;
use std::time::Instant;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;
use sqlx::postgres::PgPoolOptions;

use crate::config::Config;
use crate::data::Data;
use crate::events::audit_mirror::{self, AuditEvent};
use warden_commands::Dispatcher;
use warden_core::Error;
use warden_core::platform::DiscordPlatform;
use warden_database::{CacheService, Database, MIGRATOR};

const MAX_CACHED_MESSAGES: usize = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    info!("PostgreSQL connection established.");

    let cache = build_cache(&config).await;
    let db = Database::with_cache(db_pool, cache);

    if config.auto_run_migrations {
        MIGRATOR.run(db.pool()).await?;
        info!("Database migrations applied.");
    } else {
        info!("Auto migrations disabled (set AUTO_RUN_MIGRATIONS=true to run at startup).");
    }

    warden_commands::utility::botinfo::mark_started();

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS
        | serenity::GatewayIntents::GUILD_MODERATION
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let registration_guild = config.guild_id.map(serenity::GuildId::new);
    let store = Arc::new(db);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, _ready, _framework| {
            let store = store.clone();
            Box::pin(async move {
                info!("Warden is online.");

                let platform = Arc::new(DiscordPlatform::new(ctx.http.clone(), ctx.cache.clone()));
                let registry = Arc::new(warden_commands::registry());
                registration::register(&ctx.http, &registry, registration_guild).await?;

                let dispatcher = Dispatcher::new(registry, platform.clone(), store.clone());
                Ok(Data::new(dispatcher, platform, store))
            })
        })
        .build();

    let mut cache_settings = ::serenity::cache::Settings::default();
    cache_settings.max_messages = MAX_CACHED_MESSAGES;

    info!("Warden is connecting...");

    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .cache_settings(cache_settings)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

async fn build_cache(config: &Config) -> CacheService {
    let prefix = config.redis_key_prefix.clone();

    let cache = if config.redis_enabled {
        match config.redis_url.as_deref() {
            Some(redis_url) => match CacheService::redis(redis_url, prefix.clone()) {
                Ok(cache) => {
                    info!(key_prefix = %prefix, "Redis cache enabled.");
                    cache
                }
                Err(err) => {
                    warn!(?err, key_prefix = %prefix, "Failed to initialize Redis cache; continuing with DB-only mode.");
                    CacheService::disabled(prefix)
                }
            },
            None => {
                warn!(key_prefix = %prefix, "REDIS_ENABLED=true but REDIS_URL is missing; continuing with DB-only mode.");
                CacheService::disabled(prefix)
            }
        }
    } else {
        info!("Redis cache disabled (set REDIS_ENABLED=true to enable).");
        CacheService::disabled(prefix)
    };

    if cache.is_redis_enabled() {
        if let Err(err) = cache.ping().await {
            warn!(
                ?err,
                "Redis cache ping failed; cache operations will continue with fallback behavior."
            );
        } else {
            info!("Redis cache health check passed.");
        }
    }

    cache
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!(?error, "framework setup failed");
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(?error, event = event.snake_case_name(), "event handler error");
        }
        other => {
            if let Err(source) = poise::builtins::on_error(other).await {
                error!(?source, "failed to handle framework error");
            }
        }
    }
}

async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            let was_command = events::commands::handle_message(data, new_message).await;
            if !was_command
                && !new_message.author.bot
                && let Some(guild_id) = new_message.guild_id
            {
                events::leveling::award_message_xp(
                    data.store.as_ref(),
                    data.platform.as_ref(),
                    &data.xp_cooldowns,
                    guild_id,
                    new_message.channel_id,
                    new_message.author.id,
                    Instant::now(),
                )
                .await?;
            }
        }
        serenity::FullEvent::InteractionCreate { interaction } => {
            events::commands::handle_interaction(data, interaction).await;
        }
        serenity::FullEvent::GuildAuditLogEntryCreate { entry, guild_id } => {
            if let Some(audit_event) = AuditEvent::from_audit_entry(entry) {
                audit_mirror::publish(
                    data.platform.as_ref(),
                    data.store.as_ref(),
                    *guild_id,
                    &audit_event,
                )
                .await;
            }
        }
        serenity::FullEvent::MessageUpdate {
            old_if_available,
            event,
            ..
        } => {
            let Some(guild_id) = event.guild_id else {
                return Ok(());
            };

            let author = event.author.as_ref().map(|user| (user.id.get(), user.bot));
            let before = old_if_available
                .as_ref()
                .map(|message| message.content.as_str());
            if let Some(audit_event) = AuditEvent::message_edit(
                author,
                event.channel_id.get(),
                before,
                event.content.as_deref(),
            ) {
                audit_mirror::publish(
                    data.platform.as_ref(),
                    data.store.as_ref(),
                    guild_id,
                    &audit_event,
                )
                .await;
            }
        }
        serenity::FullEvent::MessageDelete {
            channel_id,
            deleted_message_id,
            guild_id: Some(guild_id),
            ..
        } => {
            let cached = ctx
                .cache
                .message(*channel_id, *deleted_message_id)
                .map(|message| {
                    (
                        message.author.id.get(),
                        message.author.bot,
                        message.content.clone(),
                    )
                });

            if let Some(audit_event) = AuditEvent::message_delete(channel_id.get(), cached) {
                audit_mirror::publish(
                    data.platform.as_ref(),
                    data.store.as_ref(),
                    *guild_id,
                    &audit_event,
                )
                .await;
            }
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            if !new_member.user.bot {
                let granted = events::auto_roles::grant_auto_roles(
                    data.store.as_ref(),
                    data.platform.as_ref(),
                    new_member.guild_id,
                    new_member.user.id,
                )
                .await;
                debug!(
                    granted,
                    guild_id = new_member.guild_id.get(),
                    "applied auto roles"
                );
            }
        }
        serenity::FullEvent::ReactionAdd { add_reaction } => {
            handle_reaction(ctx, data, add_reaction, true).await?;
        }
        serenity::FullEvent::ReactionRemove { removed_reaction } => {
            handle_reaction(ctx, data, removed_reaction, false).await?;
        }
        _ => {}
    }

    Ok(())
}

async fn handle_reaction(
    ctx: &serenity::Context,
    data: &Data,
    reaction: &serenity::Reaction,
    added: bool,
) -> Result<(), Error> {
    let (Some(guild_id), Some(user_id)) = (reaction.guild_id, reaction.user_id) else {
        return Ok(());
    };

    if user_id == ctx.cache.current_user().id {
        return Ok(());
    }
    if reaction
        .member
        .as_ref()
        .is_some_and(|member| member.user.bot)
    {
        return Ok(());
    }

    let emoji = reaction.emoji.to_string();
    events::reaction_roles::sync_reaction_role(
        data.store.as_ref(),
        data.platform.as_ref(),
        guild_id,
        user_id,
        reaction.message_id,
        &emoji,
        added,
    )
    .await?;

    Ok(())
}
