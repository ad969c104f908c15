// Sun Oct 18 2026 - Alex

use crate::error::HandlerResult;
use crate::handler::commands::validate_name;
use crate::handler::{CommandEntry, Context};
use indexmap::IndexMap;
use itertools::Itertools;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

/// Registration hook a command module exposes; run once at startup.
pub type RegisterFn = fn(&CommandRegistry) -> HandlerResult<()>;

static GLOBAL_REGISTRY: Lazy<Arc<CommandRegistry>> = Lazy::new(|| Arc::new(CommandRegistry::new()));

pub struct CommandRegistry {
    entries: RwLock<IndexMap<String, CommandEntry>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    pub fn register<F>(&self, name: impl Into<String>, handler: F, help: impl Into<String>) -> HandlerResult<()>
    where
        F: Fn(clap::Command, &Context, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register_entry(name, CommandEntry::new(handler).with_help(help))
    }

    /// Later registrations under the same name replace earlier ones.
    pub fn register_entry(&self, name: impl Into<String>, entry: CommandEntry) -> HandlerResult<()> {
        let name = name.into();
        validate_name(&name)?;

        log::debug!("Registering subcommand '{}'", name);
        self.entries.write().insert(name, entry);
        Ok(())
    }

    pub fn install(&self, modules: &[RegisterFn]) -> HandlerResult<()> {
        for register in modules {
            register(self)?;
        }
        Ok(())
    }

    pub fn reset(&self) {
        self.entries.write().clear();
    }

    pub fn all(&self) -> IndexMap<String, CommandEntry> {
        self.entries.read().clone()
    }

    pub fn get(&self, name: &str) -> Option<CommandEntry> {
        self.entries.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().sorted().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry handlers merge from unless given their own.
pub fn global() -> Arc<CommandRegistry> {
    Arc::clone(&GLOBAL_REGISTRY)
}

pub fn subcmd<F>(name: impl Into<String>, handler: F, help: impl Into<String>) -> HandlerResult<()>
where
    F: Fn(clap::Command, &Context, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
{
    GLOBAL_REGISTRY.register(name, handler, help)
}

/// Forget every subcommand registered through [`subcmd`].
pub fn reset_registered_subcommands() {
    GLOBAL_REGISTRY.reset();
}
