// Sat Oct 17 2026 - Alex

use super::args::Context;
use crate::error::{HandlerError, HandlerResult};
use std::fmt;
use std::sync::Arc;

/// Signature every subcommand implements: a sub-parser scoped to
/// `"<prog> <name>"`, the caller's context and the unparsed remainder.
pub type CommandFn = Arc<dyn Fn(clap::Command, &Context, &[String]) -> anyhow::Result<()> + Send + Sync>;

#[derive(Clone)]
pub struct CommandEntry {
    handler: CommandFn,
    help: String,
}

impl CommandEntry {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(clap::Command, &Context, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            help: String::new(),
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn call(&self, parser: clap::Command, context: &Context, remainder: &[String]) -> anyhow::Result<()> {
        (self.handler)(parser, context, remainder)
    }

    pub fn same_handler(&self, other: &CommandEntry) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<F> From<F> for CommandEntry
where
    F: Fn(clap::Command, &Context, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        CommandEntry::new(handler)
    }
}

/// `(handler, help)` pairs.
impl<F, S> From<(F, S)> for CommandEntry
where
    F: Fn(clap::Command, &Context, &[String]) -> anyhow::Result<()> + Send + Sync + 'static,
    S: Into<String>,
{
    fn from((handler, help): (F, S)) -> Self {
        CommandEntry::new(handler).with_help(help)
    }
}

impl fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandEntry")
            .field("help", &self.help)
            .finish_non_exhaustive()
    }
}

/// A subcommand name must be selectable as a positional token.
pub(crate) fn validate_name(name: &str) -> HandlerResult<()> {
    if name.trim().is_empty() || name.starts_with('-') || name.chars().any(char::is_whitespace) {
        return Err(HandlerError::InvalidSubcommandName(name.to_string()));
    }
    Ok(())
}
