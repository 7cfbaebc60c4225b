mod support;

use std::time::{Duration, Instant};

use poise::serenity_prelude as serenity;

use support::{Harness, guild, moderator, prefix, slash};
use warden_commands::economy::buy::ROLE_GRANT_FAILED_MESSAGE;
use warden_commands::{COMMANDS, DispatchOutcome};
use warden_core::RoleSummary;
use warden_core::testing::PlatformCall;
use warden_database::model::economy::NewShopItem;
use warden_database::model::settings::ServerSettings;
use warden_database::{EconomyStore, RoleStore, SettingsStore};

async fn stock_item(harness: &Harness, price: i64, role_id: Option<u64>, stock: i32) -> u64 {
    harness
        .store
        .create_shop_item(NewShopItem {
            guild_id: guild().get(),
            name: "VIP".to_owned(),
            description: None,
            price,
            role_id,
            stock,
        })
        .await
        .expect("item")
        .id
}

async fn wallet(harness: &Harness) -> i64 {
    harness
        .store
        .open_account(guild().get(), moderator().get())
        .await
        .expect("account")
        .balance
}

#[tokio::test]
async fn buying_debits_and_grants_the_role() {
    let harness = Harness::new();
    let item_id = stock_item(&harness, 60, Some(9), 1).await;
    harness.store.set_balance(guild().get(), moderator().get(), 100);

    let start = Instant::now();
    harness
        .dispatcher
        .dispatch_at(prefix(&format!("buy {item_id}")), start)
        .await;

    assert_eq!(
        harness.platform.calls(),
        vec![PlatformCall::AddRole {
            user_id: moderator(),
            role_id: serenity::RoleId::new(9),
        }]
    );
    assert_eq!(wallet(&harness).await, 40);

    harness
        .dispatcher
        .dispatch_at(prefix(&format!("buy {item_id}")), start + Duration::from_secs(5))
        .await;
    assert_eq!(harness.last_reply(), "**VIP** is sold out.");
    assert_eq!(wallet(&harness).await, 40);
}

#[tokio::test]
async fn failed_role_grant_refunds_the_purchase() {
    let harness = Harness::new();
    let item_id = stock_item(&harness, 60, Some(9), 1).await;
    harness.store.set_balance(guild().get(), moderator().get(), 100);
    harness.platform.fail_on("add_role");

    harness
        .dispatcher
        .dispatch(prefix(&format!("buy {item_id}")))
        .await;

    assert_eq!(harness.last_reply(), ROLE_GRANT_FAILED_MESSAGE);
    assert_eq!(wallet(&harness).await, 100);
    let item = harness
        .store
        .shop_item(guild().get(), item_id)
        .await
        .expect("read")
        .expect("item");
    assert_eq!(item.stock, 1);
}

#[tokio::test]
async fn buying_without_funds_releases_stock() {
    let harness = Harness::new();
    let item_id = stock_item(&harness, 500, None, 2).await;

    harness
        .dispatcher
        .dispatch(prefix(&format!("buy {item_id}")))
        .await;

    assert_eq!(harness.last_reply(), "You need 500 coins in your wallet to buy **VIP**.");
    let item = harness
        .store
        .shop_item(guild().get(), item_id)
        .await
        .expect("read")
        .expect("item");
    assert_eq!(item.stock, 2);
}

#[tokio::test]
async fn daily_can_only_be_claimed_once() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("daily")).await;
    assert_eq!(wallet(&harness).await, 100);

    harness.dispatcher.dispatch(slash("daily", vec![])).await;
    assert!(harness.last_reply().starts_with("You already claimed your daily reward."));
    assert_eq!(wallet(&harness).await, 100);
}

#[tokio::test]
async fn deposits_cannot_exceed_the_wallet() {
    let harness = Harness::new();
    harness.store.set_balance(guild().get(), moderator().get(), 50);

    harness.dispatcher.dispatch(prefix("deposit 80")).await;
    assert_eq!(harness.last_reply(), "You don't have that many coins in your wallet.");

    harness.dispatcher.dispatch(prefix("withdraw 10")).await;
    assert_eq!(harness.last_reply(), "You don't have that many coins in the bank.");

    let account = harness
        .store
        .open_account(guild().get(), moderator().get())
        .await
        .expect("account");
    assert_eq!((account.balance, account.bank), (50, 0));
}

#[tokio::test]
async fn disabled_economy_refuses_commands() {
    let harness = Harness::new();
    let mut settings = ServerSettings::defaults(guild().get());
    settings.economy_system = false;
    harness.store.set_server_settings(settings);

    harness.dispatcher.dispatch(prefix("daily")).await;

    let replies = harness.platform.replies();
    assert!(replies[0].ephemeral);
    assert!(replies[0].plain_text().contains("economy system is disabled"));
    assert_eq!(wallet(&harness).await, 0);
}

#[tokio::test]
async fn togglemodule_flips_the_flag() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("togglemodule levels")).await;

    let settings = harness
        .store
        .server_settings(guild().get())
        .await
        .expect("settings");
    assert!(!settings.level_system);
    assert!(settings.economy_system);
    assert_eq!(harness.last_reply(), "Leveling: disabled.");
}

#[tokio::test]
async fn configured_mod_role_gates_moderation() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("setmodrole <@&55>")).await;
    let outcome = harness.dispatcher.dispatch(prefix("kick <@2>")).await;

    assert_eq!(outcome, DispatchOutcome::MissingModRole);
    assert!(harness.platform.calls().is_empty());

    harness.dispatcher.dispatch(prefix("removemodrole <@&55>")).await;
    let settings = harness
        .store
        .server_settings(guild().get())
        .await
        .expect("settings");
    assert!(settings.mod_roles.is_empty());
}

#[tokio::test]
async fn log_channel_can_be_set_and_cleared() {
    let harness = Harness::new();
    let start = Instant::now();

    harness
        .dispatcher
        .dispatch_at(prefix("setlogchannel <#42>"), start)
        .await;
    assert_eq!(
        harness
            .store
            .server_settings(guild().get())
            .await
            .expect("settings")
            .log_channel_id,
        Some(42)
    );

    harness
        .dispatcher
        .dispatch_at(prefix("setlogchannel clear"), start + Duration::from_secs(5))
        .await;
    assert_eq!(
        harness
            .store
            .server_settings(guild().get())
            .await
            .expect("settings")
            .log_channel_id,
        None
    );
    assert_eq!(harness.last_reply(), "Log channel cleared.");
}

#[tokio::test]
async fn auto_and_reaction_roles_are_stored() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("autorole add <@&7>")).await;
    harness
        .dispatcher
        .dispatch(prefix("reactionrole add 999 ✅ <@&8>"))
        .await;

    let auto_roles = harness.store.auto_roles(guild().get()).await.expect("auto roles");
    assert_eq!(auto_roles.len(), 1);
    assert_eq!(auto_roles[0].role_id, 7);

    let binding = harness
        .store
        .reaction_role(guild().get(), 999, "✅")
        .await
        .expect("read")
        .expect("binding");
    assert_eq!(binding.role_id, 8);
    assert_eq!(binding.channel_id, 200);
}

#[tokio::test]
async fn roleinfo_reports_unknown_roles() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("roleinfo <@&7>")).await;

    assert_eq!(harness.last_reply(), "I couldn't find that role.");
}

#[tokio::test]
async fn rank_reports_members_without_xp() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("rank <@2>")).await;

    assert_eq!(harness.last_reply(), "<@2> hasn't earned any XP yet.");
}

#[tokio::test]
async fn help_and_botinfo_describe_the_registry() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("help moderation")).await;
    let help = harness.last_reply();
    assert!(help.starts_with("Moderation Commands"));
    assert!(help.contains("`softban`:"));
    assert!(!help.contains("`ping`:"));

    harness.dispatcher.dispatch(prefix("botinfo")).await;
    let info = harness.last_reply();
    assert!(info.contains(&format!("Commands: {}", COMMANDS.len())));
    assert!(info.contains("Servers: 1"));
}

#[tokio::test]
async fn setlevel_feeds_the_leaderboard() {
    let harness = Harness::new();
    let start = Instant::now();

    harness
        .dispatcher
        .dispatch_at(prefix("setlevel <@2> 5"), start)
        .await;
    assert_eq!(harness.last_reply(), "<@2> is now level 5 (2500 XP).");

    harness
        .dispatcher
        .dispatch_at(prefix("setlevel <@1> 2"), start + Duration::from_secs(5))
        .await;
    harness
        .dispatcher
        .dispatch_at(prefix("setlevel <@1> 5000"), start + Duration::from_secs(10))
        .await;
    assert_eq!(harness.last_reply(), "The level must be between 0 and 1000.");

    harness.dispatcher.dispatch(prefix("levels")).await;
    let board = harness.last_reply();
    let first = board.find("<@2> · level 5 (2500 XP)").expect("first place");
    let second = board.find("<@1> · level 2 (400 XP)").expect("second place");
    assert!(first < second);
}

#[tokio::test]
async fn shop_items_can_be_added_and_removed() {
    let harness = Harness::new();

    harness
        .dispatcher
        .dispatch(prefix("additem 50 3 <@&9> VIP Pass"))
        .await;

    let items = harness.store.shop_items(guild().get()).await.expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "VIP Pass");
    assert_eq!(items[0].price, 50);
    assert_eq!(items[0].stock, 3);
    assert_eq!(items[0].role_id, Some(9));

    let item_id = items[0].id;
    harness
        .dispatcher
        .dispatch(prefix(&format!("removeitem {item_id}")))
        .await;

    assert!(harness.store.shop_items(guild().get()).await.expect("items").is_empty());
    assert_eq!(
        harness.last_reply(),
        format!("Removed item #{item_id} from the shop.")
    );
}

#[tokio::test]
async fn listmodroles_shows_configured_roles() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("listmodroles")).await;
    assert!(harness.last_reply().starts_with("No moderator roles are set"));

    harness.dispatcher.dispatch(prefix("setmodrole <@&55>")).await;
    harness
        .dispatcher
        .dispatch(slash("listmodroles", Vec::new()))
        .await;
    assert!(harness.last_reply().contains("<@&55>"));
}

#[tokio::test]
async fn giverole_records_the_change() {
    let harness = Harness::new();

    harness.dispatcher.dispatch(prefix("giverole <@2> <@&9>")).await;

    assert_eq!(
        harness.platform.calls(),
        vec![PlatformCall::AddRole {
            user_id: serenity::UserId::new(2),
            role_id: serenity::RoleId::new(9),
        }]
    );
    let logs = harness.store.modlogs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "giverole");
}

#[tokio::test]
async fn roleinfo_describes_a_known_role() {
    let harness = Harness::new();
    harness.platform.set_guild_roles(vec![RoleSummary {
        id: serenity::RoleId::new(7),
        name: "Helpers".to_owned(),
        colour: 0x3498DB,
        position: 4,
        mentionable: true,
        hoist: false,
        permissions: serenity::Permissions::empty(),
        created_at: 1_600_000_000,
        member_count: Some(12),
    }]);

    harness.dispatcher.dispatch(prefix("roleinfo <@&7>")).await;

    let info = harness.last_reply();
    assert!(info.starts_with("Role: Helpers"));
    assert!(info.contains("Colour: #3498DB"));
    assert!(info.contains("Members: 12"));
    assert!(info.contains("Created: <t:1600000000:R>"));
}
