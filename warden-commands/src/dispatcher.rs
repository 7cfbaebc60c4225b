use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, warn};

use crate::context::CommandContext;
use crate::cooldown::{CooldownCheck, CooldownTracker, PREFIX_COOLDOWN, cooldown_message};
use crate::permissions::{check_permission, holds_mod_role, mod_role_denied};
use crate::registry::Registry;
use warden_core::{CommandArgs, Invocation, Platform};
use warden_database::Store;
use warden_utils::embed::Reply;

pub const GUILD_ONLY_MESSAGE: &str = "This command only works in servers.";
pub const HANDLER_FAILURE_MESSAGE: &str = "There was an error executing that command.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored,
    CoolingDown,
    GuildOnly,
    MissingModRole,
    MissingPermission,
    Completed,
    Failed,
}

/// Runs invocations from either surface through the same gates.
pub struct Dispatcher {
    registry: Arc<Registry>,
    platform: Arc<dyn Platform>,
    store: Arc<dyn Store>,
    cooldowns: CooldownTracker,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>, platform: Arc<dyn Platform>, store: Arc<dyn Store>) -> Self {
        Self {
            registry,
            platform,
            store,
            cooldowns: CooldownTracker::new(PREFIX_COOLDOWN),
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub async fn dispatch(&self, invocation: Invocation) -> DispatchOutcome {
        self.dispatch_at(invocation, Instant::now()).await
    }

    /// [`Dispatcher::dispatch`] with an explicit clock for the cooldown check.
    pub async fn dispatch_at(&self, invocation: Invocation, now: Instant) -> DispatchOutcome {
        let Some(command) = self.registry.get(&invocation.command).copied() else {
            debug!(command = %invocation.command, "ignoring unknown command");
            return DispatchOutcome::Ignored;
        };
        let meta = command.meta;

        if invocation.is_prefix()
            && let CooldownCheck::Active { remaining } =
                self.cooldowns.check(meta.name, invocation.author_id, now)
        {
            self.send(&invocation, Reply::text(cooldown_message(meta.name, remaining)))
                .await;
            return DispatchOutcome::CoolingDown;
        }

        if meta.guild_only && invocation.guild_id.is_none() {
            self.send(&invocation, Reply::text(GUILD_ONLY_MESSAGE)).await;
            return DispatchOutcome::GuildOnly;
        }

        if meta.mod_only {
            match self.passes_mod_role_gate(&invocation).await {
                Ok(true) => {}
                Ok(false) => {
                    self.send(&invocation, mod_role_denied()).await;
                    return DispatchOutcome::MissingModRole;
                }
                Err(source) => {
                    error!(?source, command = meta.name, "moderator role check failed");
                    self.send(&invocation, failure_reply()).await;
                    return DispatchOutcome::Failed;
                }
            }
        }

        if let Some(required) = meta.permission {
            match check_permission(self.platform.as_ref(), &invocation, required).await {
                Ok(true) => {}
                Ok(false) => return DispatchOutcome::MissingPermission,
                Err(source) => {
                    error!(?source, command = meta.name, "permission check failed");
                    self.send(&invocation, failure_reply()).await;
                    return DispatchOutcome::Failed;
                }
            }
        }

        let invocation = Arc::new(invocation);
        let ctx = CommandContext {
            args: CommandArgs::resolve(meta.params, &invocation.arguments),
            invocation: Arc::clone(&invocation),
            platform: Arc::clone(&self.platform),
            store: Arc::clone(&self.store),
            registry: Arc::clone(&self.registry),
            meta,
            started_at: now,
        };

        match (command.handler)(ctx).await {
            Ok(()) => DispatchOutcome::Completed,
            Err(source) => {
                error!(?source, command = meta.name, "command handler failed");
                self.send(&invocation, failure_reply()).await;
                DispatchOutcome::Failed
            }
        }
    }

    async fn passes_mod_role_gate(&self, invocation: &Invocation) -> anyhow::Result<bool> {
        let Some(guild_id) = invocation.guild_id else {
            return Ok(false);
        };

        let settings = self.store.server_settings(guild_id.get()).await?;
        if settings.mod_roles.is_empty() {
            return Ok(true);
        }

        if !invocation.author_roles.is_empty() {
            return Ok(holds_mod_role(&settings.mod_roles, &invocation.author_roles));
        }

        let roles = self
            .platform
            .member_roles(guild_id, invocation.author_id)
            .await?;
        Ok(holds_mod_role(&settings.mod_roles, &roles))
    }

    async fn send(&self, invocation: &Invocation, reply: Reply) {
        if let Err(source) = self.platform.reply(invocation, reply).await {
            warn!(?source, command = %invocation.command, "failed to send dispatcher reply");
        }
    }
}

fn failure_reply() -> Reply {
    Reply::text(HANDLER_FAILURE_MESSAGE).ephemeral()
}
