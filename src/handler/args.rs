// Sat Oct 17 2026 - Alex

use clap::ArgMatches;
use std::any::Any;
use std::fmt;

/// Result of a parse: the declared flag values, plus the resolved
/// subcommand and its remainder when subcommands are active.
#[derive(Debug, Clone)]
pub struct ParsedArgs {
    matches: ArgMatches,
    cmd: Option<String>,
    remainder: Vec<String>,
}

impl ParsedArgs {
    pub(crate) fn new(matches: ArgMatches, cmd: Option<String>, remainder: Vec<String>) -> Self {
        Self { matches, cmd, remainder }
    }

    pub fn matches(&self) -> &ArgMatches {
        &self.matches
    }

    pub fn cmd(&self) -> Option<&str> {
        self.cmd.as_deref()
    }

    pub fn remainder(&self) -> &[String] {
        &self.remainder
    }

    /// False for unknown ids as well as unset flags.
    pub fn get_flag(&self, id: &str) -> bool {
        self.get_one::<bool>(id).copied().unwrap_or(false)
    }

    pub fn get_one<T: Any + Clone + Send + Sync + 'static>(&self, id: &str) -> Option<&T> {
        self.matches.try_get_one::<T>(id).ok().flatten()
    }

    pub fn value_of(&self, id: &str) -> Option<&str> {
        self.get_one::<String>(id).map(String::as_str)
    }
}

/// Caller-defined value threaded into every subcommand.
pub struct Context {
    value: Box<dyn Any>,
}

impl Context {
    pub fn new<T: Any>(value: T) -> Self {
        Self { value: Box::new(value) }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Set when no context function was supplied to `run`.
    pub fn args(&self) -> Option<&ParsedArgs> {
        self.downcast_ref::<ParsedArgs>()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.args() {
            Some(args) => f.debug_tuple("Context").field(args).finish(),
            None => f.write_str("Context(..)"),
        }
    }
}
