use std::collections::HashMap;

use crate::CommandMeta;
use crate::context::CommandContext;
use warden_core::Error;

pub type Handler = fn(CommandContext) -> poise::BoxFuture<'static, Result<(), Error>>;

#[derive(Clone, Copy)]
pub struct Command {
    pub meta: CommandMeta,
    pub handler: Handler,
}

/// Name → command lookup shared by the dispatcher and slash registration.
#[derive(Clone, Default)]
pub struct Registry {
    commands: HashMap<&'static str, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command. A later registration under the same name replaces the
    /// earlier one, which is returned.
    pub fn register(&mut self, meta: CommandMeta, handler: Handler) -> Option<Command> {
        self.commands.insert(meta.name, Command { meta, handler })
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands sorted by category, then name.
    pub fn sorted(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self.commands.values().collect();
        commands.sort_unstable_by(|left, right| {
            left.meta
                .category
                .cmp(right.meta.category)
                .then_with(|| left.meta.name.cmp(right.meta.name))
        });
        commands
    }

    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> =
            self.commands.values().map(|cmd| cmd.meta.category).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}
