mod support;

use std::collections::HashSet;
use std::time::{Duration, Instant};

use poise::serenity_prelude as serenity;

use support::{Harness, guild, moderator, prefix, prefix_from, slash, target};
use warden_commands::dispatcher::{GUILD_ONLY_MESSAGE, HANDLER_FAILURE_MESSAGE};
use warden_commands::{COMMANDS, DispatchOutcome, registry};
use warden_core::{Invocation, OptionValue};
use warden_database::model::settings::ServerSettings;

#[tokio::test]
async fn unknown_commands_get_no_reply() {
    let harness = Harness::new();

    let outcome = harness.dispatcher.dispatch(prefix("frobnicate now")).await;

    assert_eq!(outcome, DispatchOutcome::Ignored);
    assert!(harness.platform.replies().is_empty());
    assert!(harness.platform.calls().is_empty());
}

#[tokio::test]
async fn prefix_commands_cool_down_per_user() {
    let harness = Harness::new();
    let start = Instant::now();

    let first = harness.dispatcher.dispatch_at(prefix("ping"), start).await;
    let second = harness
        .dispatcher
        .dispatch_at(prefix("ping"), start + Duration::from_secs(1))
        .await;

    assert_eq!(first, DispatchOutcome::Completed);
    assert_eq!(second, DispatchOutcome::CoolingDown);
    assert_eq!(
        harness.reply_texts(),
        vec![
            "Pong!".to_owned(),
            "Please wait 2.0 more seconds before using the `ping` command.".to_owned(),
        ]
    );

    let other_user = harness
        .dispatcher
        .dispatch_at(prefix_from(target(), "ping"), start + Duration::from_secs(1))
        .await;
    assert_eq!(other_user, DispatchOutcome::Completed);

    let after_window = harness
        .dispatcher
        .dispatch_at(prefix("ping"), start + Duration::from_secs(3))
        .await;
    assert_eq!(after_window, DispatchOutcome::Completed);
}

#[tokio::test]
async fn slash_commands_skip_the_cooldown() {
    let harness = Harness::new();
    let now = Instant::now();

    for _ in 0..3 {
        let outcome = harness.dispatcher.dispatch_at(slash("ping", vec![]), now).await;
        assert_eq!(outcome, DispatchOutcome::Completed);
    }
    assert_eq!(harness.reply_texts(), vec!["Pong!"; 3]);
}

#[tokio::test]
async fn guild_only_commands_are_refused_in_dms() {
    let harness = Harness::new();
    let invocation = Invocation::prefix(
        "warnings",
        serenity::ChannelId::new(9),
        moderator(),
        serenity::MessageId::new(10),
        vec!["<@2>".to_owned()],
    );

    let outcome = harness.dispatcher.dispatch(invocation).await;

    assert_eq!(outcome, DispatchOutcome::GuildOnly);
    assert_eq!(harness.reply_texts(), vec![GUILD_ONLY_MESSAGE]);
}

#[tokio::test]
async fn mod_role_gate_blocks_members_without_the_role() {
    let harness = Harness::new();
    let mut settings = ServerSettings::defaults(guild().get());
    settings.mod_roles = vec![500];
    harness.store.set_server_settings(settings);

    let outcome = harness.dispatcher.dispatch(prefix("ban <@2> spam")).await;

    assert_eq!(outcome, DispatchOutcome::MissingModRole);
    assert!(harness.platform.calls().is_empty());
    assert!(harness.store.modlogs().is_empty());
    assert!(harness.last_reply().contains("You need a moderator role"));
    assert!(harness.platform.replies()[0].ephemeral);
}

#[tokio::test]
async fn mod_role_from_the_platform_opens_the_gate() {
    let harness = Harness::new();
    let mut settings = ServerSettings::defaults(guild().get());
    settings.mod_roles = vec![500];
    harness.store.set_server_settings(settings);
    harness
        .platform
        .set_member_roles(moderator(), vec![serenity::RoleId::new(500)]);

    let outcome = harness.dispatcher.dispatch(prefix("kick <@2>")).await;

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(harness.platform.call_names(), vec!["kick"]);
}

#[tokio::test]
async fn roles_on_the_invocation_are_used_first() {
    let harness = Harness::new();
    let mut settings = ServerSettings::defaults(guild().get());
    settings.mod_roles = vec![500];
    harness.store.set_server_settings(settings);
    harness.platform.fail_on("member_roles");

    let invocation = prefix("kick <@2>").with_roles(vec![serenity::RoleId::new(500)]);
    let outcome = harness.dispatcher.dispatch(invocation).await;

    assert_eq!(outcome, DispatchOutcome::Completed);
}

#[tokio::test]
async fn missing_permissions_are_listed() {
    let harness = Harness::new();
    harness
        .platform
        .grant(target(), serenity::Permissions::KICK_MEMBERS);

    let outcome = harness
        .dispatcher
        .dispatch(prefix_from(target(), "ban <@3>"))
        .await;

    assert_eq!(outcome, DispatchOutcome::MissingPermission);
    assert!(harness.platform.calls().is_empty());
    let reply = harness.last_reply();
    assert!(reply.contains("❌ Permission Denied"));
    assert!(reply.contains("You need the following permission(s): BAN_MEMBERS"));
}

#[tokio::test]
async fn interaction_permissions_skip_the_platform_lookup() {
    let harness = Harness::new();
    harness.platform.fail_on("member_permissions");

    let invocation = slash(
        "kick",
        vec![("user", OptionValue::User(target()))],
    )
    .with_permissions(serenity::Permissions::KICK_MEMBERS);
    let outcome = harness.dispatcher.dispatch(invocation).await;

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(harness.platform.call_names(), vec!["kick"]);
}

#[tokio::test]
async fn handler_errors_get_a_generic_reply() {
    let harness = Harness::new();
    harness.store.fail_writes(true);

    let outcome = harness.dispatcher.dispatch(prefix("warn <@2> spam")).await;

    assert_eq!(outcome, DispatchOutcome::Failed);
    let replies = harness.platform.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].plain_text(), HANDLER_FAILURE_MESSAGE);
    assert!(replies[0].ephemeral);
}

#[test]
fn command_names_are_unique() {
    let names: HashSet<&str> = COMMANDS.iter().map(|meta| meta.name).collect();
    assert_eq!(names.len(), COMMANDS.len());
    assert_eq!(registry().len(), COMMANDS.len());
}

#[test]
fn every_mutating_moderation_command_is_gated() {
    let registry = registry();
    for name in [
        "ban", "unban", "kick", "softban", "warn", "clearwarns", "mute", "unmute", "purge",
        "lock", "unlock", "slowmode", "giverole", "removerole",
    ] {
        let command = registry.get(name).expect(name);
        assert!(command.meta.mod_only, "{name} should need a mod role");
        assert!(command.meta.permission.is_some(), "{name} should need a permission");
        assert!(command.meta.guild_only, "{name} should be guild only");
    }
}
