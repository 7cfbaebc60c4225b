mod support;

use std::time::Duration;

use poise::serenity_prelude as serenity;

use support::{Harness, channel, guild, prefix, slash, target};
use warden_commands::DispatchOutcome;
use warden_commands::moderation::embeds::NOT_RECORDED_FOOTER;
use warden_commands::moderation::mute::{
    DURATION_RANGE_MESSAGE, INVALID_DURATION_MESSAGE, MISSING_ARGUMENTS_MESSAGE,
};
use warden_core::OptionValue;
use warden_core::testing::PlatformCall;
use warden_database::{ModerationStore, SettingsStore};
use warden_database::model::settings::ServerSettings;

#[tokio::test]
async fn ban_records_one_modlog() {
    let harness = Harness::new();

    let outcome = harness.dispatcher.dispatch(prefix("ban <@2> raiding")).await;

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(
        harness.platform.calls(),
        vec![PlatformCall::Ban {
            guild_id: guild(),
            user_id: target(),
            delete_message_days: 0,
            reason: "raiding".to_owned(),
        }]
    );

    let logs = harness.store.modlogs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "ban");
    assert_eq!(logs[0].user_id, target().get());
    assert_eq!(logs[0].reason.as_deref(), Some("raiding"));

    let reply = harness.last_reply();
    assert!(reply.contains("Member banned"));
    assert!(!reply.contains(NOT_RECORDED_FOOTER));
}

#[tokio::test]
async fn softban_bans_then_unbans() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("softban <@2> spam")).await;

    assert_eq!(harness.platform.call_names(), vec!["ban", "unban"]);
    assert!(matches!(
        harness.platform.calls()[0],
        PlatformCall::Ban {
            delete_message_days: 7,
            ..
        }
    ));
    let logs = harness.store.modlogs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "softban");
}

#[tokio::test]
async fn softban_stops_when_the_ban_fails() {
    let harness = Harness::new();
    harness.platform.fail_on("ban");

    harness.dispatcher.dispatch(prefix("softban <@2>")).await;

    assert!(harness.platform.calls().is_empty());
    assert!(harness.store.modlogs().is_empty());
    assert!(harness.last_reply().starts_with("Failed to ban that member"));
}

#[tokio::test]
async fn softban_reports_a_failed_unban() {
    let harness = Harness::new();
    harness.platform.fail_on("unban");

    harness.dispatcher.dispatch(prefix("softban <@2>")).await;

    assert_eq!(harness.platform.call_names(), vec!["ban"]);
    assert!(harness.store.modlogs().is_empty());
    assert!(harness.last_reply().contains("still banned"));
}

#[tokio::test]
async fn platform_failures_write_nothing() {
    let cases = [
        ("ban <@2>", "ban"),
        ("unban <@2>", "unban"),
        ("kick <@2>", "kick"),
        ("softban <@2>", "ban"),
        ("mute <@2> 1h", "timeout"),
        ("unmute <@2>", "timeout"),
        ("purge 5", "bulk_delete"),
        ("lock", "set_channel_locked"),
        ("unlock", "set_channel_locked"),
        ("slowmode 10", "set_slowmode"),
        ("giverole <@2> <@&9>", "add_role"),
        ("removerole <@2> <@&9>", "remove_role"),
    ];

    for (line, operation) in cases {
        let harness = Harness::new();
        harness.platform.fail_on(operation);

        let outcome = harness.dispatcher.dispatch(prefix(line)).await;

        assert_eq!(outcome, DispatchOutcome::Completed, "{line}");
        assert!(harness.store.modlogs().is_empty(), "{line} wrote a mod log");
        assert!(harness.store.all_mutes().is_empty(), "{line} wrote a mute");
        assert!(
            harness.last_reply().starts_with("Failed to"),
            "{line} replied {:?}",
            harness.last_reply()
        );
    }
}

#[tokio::test]
async fn unrecorded_actions_carry_a_warning_footer() {
    let harness = Harness::new();
    harness.store.fail_writes(true);

    let outcome = harness.dispatcher.dispatch(prefix("kick <@2>")).await;

    assert_eq!(outcome, DispatchOutcome::Completed);
    assert_eq!(harness.platform.call_names(), vec!["kick"]);
    let replies = harness.platform.replies();
    let embed = replies[0].embed.as_ref().expect("success embed");
    assert_eq!(embed.footer.as_deref(), Some(NOT_RECORDED_FOOTER));
}

#[tokio::test]
async fn self_moderation_is_refused() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("ban <@1>")).await;

    assert!(harness.platform.calls().is_empty());
    assert_eq!(harness.last_reply(), "You can't ban yourself.");
}

#[tokio::test]
async fn mute_without_duration_asks_for_one() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("mute <@2>")).await;

    assert!(harness.platform.calls().is_empty());
    assert_eq!(harness.last_reply(), MISSING_ARGUMENTS_MESSAGE);
}

#[tokio::test]
async fn mute_rejects_bad_durations() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("mute <@2> soon")).await;
    assert_eq!(harness.last_reply(), INVALID_DURATION_MESSAGE);

    let harness = Harness::new();
    harness.dispatcher.dispatch(prefix("mute <@2> 29d")).await;
    assert_eq!(harness.last_reply(), DURATION_RANGE_MESSAGE);

    let harness = Harness::new();
    harness.dispatcher.dispatch(prefix("mute <@2> 0m")).await;
    assert_eq!(harness.last_reply(), DURATION_RANGE_MESSAGE);
    assert!(harness.platform.calls().is_empty());
}

#[tokio::test]
async fn mute_times_out_and_stores_the_expiry() {
    let harness = Harness::new();

    harness
        .dispatcher
        .dispatch(prefix("mute <@2> 2h being loud"))
        .await;

    let calls = harness.platform.calls();
    let [PlatformCall::Timeout {
        until_unix: Some(until),
        ..
    }] = calls.as_slice()
    else {
        panic!("expected one timeout, got {calls:?}");
    };

    let mutes = harness.store.all_mutes();
    assert_eq!(mutes.len(), 1);
    assert_eq!(mutes[0].expires_at, *until);
    assert_eq!(mutes[0].reason, "being loud");
    let stored_for = mutes[0].expires_at - mutes[0].created_at;
    assert!((7_199..=7_200).contains(&stored_for), "stored {stored_for}s");
}

#[tokio::test]
async fn unmute_clears_the_timeout() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("unmute <@2>")).await;

    assert_eq!(
        harness.platform.calls(),
        vec![PlatformCall::Timeout {
            guild_id: guild(),
            user_id: target(),
            until_unix: None,
        }]
    );
    assert_eq!(harness.store.modlogs()[0].action, "unmute");
}

#[tokio::test]
async fn purge_is_clamped_to_one_hundred() {
    let harness = Harness::new();
    harness.platform.set_available_messages(200);

    harness.dispatcher.dispatch(prefix("purge 150")).await;

    assert_eq!(
        harness.platform.calls(),
        vec![PlatformCall::BulkDelete {
            channel_id: channel(),
            limit: 100,
        }]
    );

    let announcements = harness.platform.announcements();
    assert_eq!(announcements.len(), 1);
    assert_eq!(announcements[0].reply.plain_text(), "Purged 99 message(s).");
    assert_eq!(announcements[0].delete_after, Some(Duration::from_secs(3)));
    assert!(harness.platform.replies().is_empty());
    assert_eq!(harness.store.modlogs()[0].action, "purge");
}

#[tokio::test]
async fn slash_purge_replies_ephemerally() {
    let harness = Harness::new();
    harness.platform.set_available_messages(30);

    harness
        .dispatcher
        .dispatch(slash("purge", vec![("amount", OptionValue::Integer(150))]))
        .await;

    let replies = harness.platform.replies();
    assert_eq!(replies.len(), 1);
    assert!(replies[0].ephemeral);
    assert_eq!(replies[0].plain_text(), "Purged 30 message(s).");
}

#[tokio::test]
async fn warn_publishes_to_the_log_channel() {
    let harness = Harness::new();
    let mut settings = ServerSettings::defaults(guild().get());
    settings.log_channel_id = Some(777);
    harness.store.set_server_settings(settings);

    harness
        .dispatcher
        .dispatch(prefix("warn <@2> rude @everyone"))
        .await;

    assert_eq!(harness.store.all_warnings().len(), 1);
    let announcements = harness.platform.announcements();
    assert_eq!(announcements.len(), 1);
    assert_eq!(announcements[0].channel_id, serenity::ChannelId::new(777));
    let text = announcements[0].reply.plain_text();
    assert!(text.contains("**Action :** Warn"));
    assert!(text.contains("@\u{200B}everyone"));
}

#[tokio::test]
async fn clearwarns_removes_every_warning() {
    let harness = Harness::new();
    harness.dispatcher.dispatch(prefix("warn <@2> one")).await;
    harness.dispatcher.dispatch(prefix("warnings <@2>")).await;

    assert_eq!(
        harness
            .store
            .warnings(guild().get(), target().get())
            .await
            .expect("warnings")
            .len(),
        1
    );

    harness.dispatcher.dispatch(prefix("clearwarns <@2>")).await;

    assert!(harness.store.all_warnings().is_empty());
    assert_eq!(harness.store.modlogs()[0].action, "clearwarns");
    assert!(harness.last_reply().contains("Cleared 1 warning(s)"));
}

#[tokio::test]
async fn lock_and_slowmode_remember_channel_state() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("lock")).await;
    harness.dispatcher.dispatch(prefix("slowmode 30")).await;

    let stored = harness
        .store
        .channel_settings(channel().get())
        .await
        .expect("read")
        .expect("row");
    assert!(stored.locked);
    assert_eq!(stored.slow_mode, Some(30));

    harness.dispatcher.dispatch(slash("slowmode", vec![])).await;
    assert_eq!(harness.last_reply(), "Slowmode in <#200> is 30s.");
}

#[tokio::test]
async fn slowmode_rejects_out_of_range_values() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("slowmode 99999")).await;

    assert!(harness.platform.calls().is_empty());
    assert_eq!(
        harness.last_reply(),
        "Slowmode must be between 0 and 21600 seconds."
    );
}

#[tokio::test]
async fn modpanel_needs_moderate_members() {
    let harness = Harness::new();

    let denied = harness
        .dispatcher
        .dispatch(support::prefix_from(target(), "modpanel"))
        .await;
    assert_eq!(denied, DispatchOutcome::MissingPermission);

    let shown = harness.dispatcher.dispatch(prefix("modpanel")).await;
    assert_eq!(shown, DispatchOutcome::Completed);
    let panel = harness.last_reply();
    assert!(panel.starts_with("🛡️ Moderation Panel"));
    assert!(panel.contains("`!purge` - "));
}
