// Sun Oct 18 2026 - Alex

pub mod args;
pub mod commands;

pub use args::{Context, ParsedArgs};
pub use commands::{CommandEntry, CommandFn};

use crate::completion;
use crate::config::HandlerConfig;
use crate::error::{HandlerError, HandlerResult};
use crate::logging::{self, LogLevel, LoggingArgument};
use crate::registry::{self, CommandRegistry};
use anyhow::anyhow;
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::validate_name;
use indexmap::IndexMap;
use itertools::Itertools;
use std::any::Any;
use std::ffi::OsString;
use std::sync::Arc;

/// Id clap files external subcommand values under.
const REMAINDER_ID: &str = "";
const GENERIC_SUBCOMMAND_HELP: &str = "the subcommand to run";

/// Wraps a `clap::Command` with subcommand dispatch, registry merging and a
/// logging-level flag. Parses exactly once.
pub struct ArgumentHandler {
    command: Command,
    prog: String,
    config: HandlerConfig,
    registry: Arc<CommandRegistry>,
    subcommands: IndexMap<String, CommandEntry>,
    use_subcommands: bool,
    use_registered_subcmds: bool,
    logging: Option<LoggingArgument>,
    has_parsed: bool,
}

impl ArgumentHandler {
    /// Default configuration, merging from the process-wide registry.
    pub fn new() -> Self {
        Self::build(HandlerConfig::default(), registry::global())
    }

    pub fn with_config(config: HandlerConfig) -> HandlerResult<Self> {
        Self::with_registry(config, registry::global())
    }

    pub fn with_registry(config: HandlerConfig, registry: Arc<CommandRegistry>) -> HandlerResult<Self> {
        config.validate()?;
        Ok(Self::build(config, registry))
    }

    fn build(config: HandlerConfig, registry: Arc<CommandRegistry>) -> Self {
        let prog = config.program_name();

        let mut command = Command::new(prog.clone()).bin_name(prog.clone());
        if let Some(about) = &config.about {
            command = command.about(about.clone());
        }
        if let Some(version) = &config.version {
            command = command.version(version.clone());
        }

        Self {
            command,
            prog,
            config,
            registry,
            subcommands: IndexMap::new(),
            use_subcommands: true,
            use_registered_subcmds: true,
            logging: None,
            has_parsed: false,
        }
    }

    pub fn prog(&self) -> &str {
        &self.prog
    }

    pub fn is_parsed(&self) -> bool {
        self.has_parsed
    }

    /// Never handle subcommands, whatever is registered.
    pub fn ignore_subcommands(&mut self) -> &mut Self {
        self.use_subcommands = false;
        self
    }

    pub fn add_argument(&mut self, arg: Arg) -> &mut Self {
        if self.has_parsed {
            log::warn!("Argument '{}' declared after parsing has no effect", arg.get_id());
        }

        if self.config.ignore_remainder && (arg.is_trailing_var_arg_set() || arg.is_last_set()) {
            log::debug!("Argument '{}' captures the remainder, disabling subcommands", arg.get_id());
            self.use_subcommands = false;
        }

        self.update_command(|command| command.arg(arg));
        self
    }

    pub fn set_logging_argument<L>(&mut self, names: &[&str], default_level: L) -> HandlerResult<()>
    where
        L: TryInto<LogLevel>,
        HandlerError: From<L::Error>,
    {
        self.set_logging_argument_with(names, default_level, logging::default_log_config)
    }

    pub fn set_logging_argument_with<L, F>(&mut self, names: &[&str], default_level: L, configurator: F) -> HandlerResult<()>
    where
        L: TryInto<LogLevel>,
        HandlerError: From<L::Error>,
        F: Fn(LogLevel, &ParsedArgs) + 'static,
    {
        if self.logging.is_some() {
            return Err(HandlerError::InvalidLoggingFlag("logging argument is already set".to_string()));
        }

        let (id, shorts, longs) = logging::split_flag_names(names)?;
        let default_level: LogLevel = default_level.try_into()?;

        let mut arg = Arg::new(id.clone())
            .action(ArgAction::Set)
            .value_parser(value_parser!(LogLevel))
            .default_value(default_level.as_str())
            .value_name("LEVEL")
            .help("the logging level");

        let mut shorts = shorts.into_iter();
        if let Some(short) = shorts.next() {
            arg = arg.short(short).visible_short_aliases(shorts);
        }
        let mut longs = longs.into_iter();
        if let Some(long) = longs.next() {
            arg = arg.long(long).visible_aliases(longs);
        }

        self.logging = Some(LoggingArgument {
            id,
            default_level,
            configurator: Box::new(configurator),
        });
        self.update_command(|command| command.arg(arg));
        Ok(())
    }

    /// Replaces the explicit subcommand table. With `merge_with_registered`
    /// off, registry entries are never consulted by this handler.
    pub fn set_subcommands<I, S, V>(&mut self, table: I, merge_with_registered: bool) -> HandlerResult<()>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<CommandEntry>,
    {
        let mut subcommands = IndexMap::new();
        for (name, entry) in table {
            let name = name.into();
            validate_name(&name)?;
            subcommands.insert(name, entry.into());
        }

        self.subcommands = subcommands;
        self.use_registered_subcmds = merge_with_registered;
        Ok(())
    }

    /// Whether a parse right now would add the subcommand slots.
    pub fn uses_subcommands(&self) -> bool {
        self.use_subcommands && !self.assembled_table().is_empty()
    }

    pub fn subcommand_names(&self) -> Vec<String> {
        self.assembled_table().keys().cloned().sorted().collect()
    }

    /// The help section describing the available subcommands, if any.
    pub fn subcommand_help_text(&self) -> Option<String> {
        if !self.use_subcommands {
            return None;
        }
        let table = self.assembled_table();
        if table.is_empty() {
            return None;
        }
        Some(subcommand_listing(&table, self.config.use_subcommand_help))
    }

    pub fn render_help(&self) -> String {
        let mut command = self.command.clone();
        if !self.has_parsed && self.use_subcommands {
            let table = self.assembled_table();
            if !table.is_empty() {
                command = attach_subcommands(command, &table, self.config.use_subcommand_help);
            }
        }
        command.render_help().to_string()
    }

    /// Parses `argv` (without the program name). Usage errors print and exit.
    pub fn parse<I, T>(&mut self, argv: I) -> HandlerResult<ParsedArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.prepare()?;
        let argv = self.with_program_name(argv);
        let matches = self
            .command
            .try_get_matches_from_mut(argv)
            .unwrap_or_else(|e| e.exit());
        Ok(self.finish(matches).unwrap_or_else(|e| e.exit()))
    }

    /// Like [`parse`](Self::parse), but usage errors are returned as
    /// [`HandlerError::Parse`].
    pub fn try_parse<I, T>(&mut self, argv: I) -> HandlerResult<ParsedArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        self.prepare()?;
        let argv = self.with_program_name(argv);
        let matches = self.command.try_get_matches_from_mut(argv)?;
        Ok(self.finish(matches)?)
    }

    /// Parses the arguments this process was invoked with.
    pub fn parse_env(&mut self) -> HandlerResult<ParsedArgs> {
        self.prepare()?;
        let matches = self
            .command
            .try_get_matches_from_mut(std::env::args_os())
            .unwrap_or_else(|e| e.exit());
        Ok(self.finish(matches).unwrap_or_else(|e| e.exit()))
    }

    pub fn run<I, T>(&mut self, argv: I) -> anyhow::Result<ParsedArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = self.parse(argv)?;
        self.dispatch(parsed, identity_context)
    }

    pub fn run_with<I, T, F, C>(&mut self, argv: I, context_fxn: F) -> anyhow::Result<ParsedArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&ParsedArgs) -> C,
        C: Any,
    {
        let parsed = self.parse(argv)?;
        self.dispatch(parsed, |args| Context::new(context_fxn(args)))
    }

    pub fn try_run<I, T>(&mut self, argv: I) -> anyhow::Result<ParsedArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = self.try_parse(argv)?;
        self.dispatch(parsed, identity_context)
    }

    pub fn try_run_with<I, T, F, C>(&mut self, argv: I, context_fxn: F) -> anyhow::Result<ParsedArgs>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&ParsedArgs) -> C,
        C: Any,
    {
        let parsed = self.try_parse(argv)?;
        self.dispatch(parsed, |args| Context::new(context_fxn(args)))
    }

    pub fn run_env(&mut self) -> anyhow::Result<ParsedArgs> {
        let parsed = self.parse_env()?;
        self.dispatch(parsed, identity_context)
    }

    pub fn run_env_with<F, C>(&mut self, context_fxn: F) -> anyhow::Result<ParsedArgs>
    where
        F: FnOnce(&ParsedArgs) -> C,
        C: Any,
    {
        let parsed = self.parse_env()?;
        self.dispatch(parsed, |args| Context::new(context_fxn(args)))
    }

    fn update_command(&mut self, f: impl FnOnce(Command) -> Command) {
        let command = std::mem::replace(&mut self.command, Command::new(self.prog.clone()));
        self.command = f(command);
    }

    fn assembled_table(&self) -> IndexMap<String, CommandEntry> {
        let mut table = self.subcommands.clone();
        if self.use_registered_subcmds {
            for (name, entry) in self.registry.all() {
                table.entry(name).or_insert(entry);
            }
        }
        table
    }

    fn with_program_name<I, T>(&self, argv: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        std::iter::once(OsString::from(&self.prog))
            .chain(argv.into_iter().map(Into::into))
            .collect()
    }

    /// Everything that must happen before clap sees the arguments. Consumes
    /// the one-shot parse even if clap later rejects the input.
    fn prepare(&mut self) -> HandlerResult<()> {
        if self.has_parsed {
            return Err(HandlerError::AlreadyParsed);
        }
        self.has_parsed = true;

        if self.use_registered_subcmds {
            let explicit = self.subcommands.len();
            for (name, entry) in self.registry.all() {
                self.subcommands.entry(name).or_insert(entry);
            }
            log::debug!(
                "Merged {} registered subcommand(s) into {} explicit",
                self.subcommands.len() - explicit,
                explicit
            );
        }

        if self.subcommands.is_empty() {
            self.use_subcommands = false;
        }

        if self.use_subcommands {
            let command = std::mem::replace(&mut self.command, Command::new(self.prog.clone()));
            self.command = attach_subcommands(command, &self.subcommands, self.config.use_subcommand_help);
        }

        if self.config.enable_autocompletion {
            completion::autocomplete(&mut self.command, &self.prog);
        }

        Ok(())
    }

    /// Resolves the command slot. Clap hands over the name and every
    /// following token untouched; the name is checked against the table here.
    fn finish(&mut self, matches: ArgMatches) -> Result<ParsedArgs, clap::Error> {
        if !self.use_subcommands {
            return Ok(ParsedArgs::new(matches, None, Vec::new()));
        }

        let (cmd, remainder) = match matches.subcommand() {
            Some((name, sub)) => {
                let remainder: Vec<String> = sub
                    .try_get_many::<String>(REMAINDER_ID)
                    .ok()
                    .flatten()
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                (Some(name.to_string()), remainder)
            }
            None => (None, Vec::new()),
        };

        if let Some(name) = &cmd {
            if !self.subcommands.contains_key(name) {
                let choices = self.subcommands.keys().sorted().join(", ");
                return Err(self.command.error(
                    ErrorKind::InvalidSubcommand,
                    format!("unrecognized subcommand '{}' (choose from {})", name, choices),
                ));
            }
        }

        Ok(ParsedArgs::new(matches, cmd, remainder))
    }

    fn dispatch<F>(&self, parsed: ParsedArgs, make_context: F) -> anyhow::Result<ParsedArgs>
    where
        F: FnOnce(&ParsedArgs) -> Context,
    {
        if let Some(logging) = &self.logging {
            let level = parsed
                .get_one::<LogLevel>(&logging.id)
                .copied()
                .unwrap_or(logging.default_level);
            (logging.configurator)(level, &parsed);
            log::debug!("Logging level set to {}", level);
        }

        let context = make_context(&parsed);

        if let Some(name) = parsed.cmd() {
            let entry = self
                .subcommands
                .get(name)
                .ok_or_else(|| anyhow!("Unknown subcommand: {}", name))?;

            let scoped = format!("{} {}", self.prog, name);
            let parser = Command::new(scoped.clone()).bin_name(scoped).no_binary_name(true);

            log::debug!("Dispatching '{}' with {} argument(s)", name, parsed.remainder().len());
            entry.call(parser, &context, parsed.remainder())?;
        }

        Ok(parsed)
    }
}

impl Default for ArgumentHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn identity_context(args: &ParsedArgs) -> Context {
    Context::new(args.clone())
}

/// One line per command, sorted, names padded to the longest + 2; or the
/// generic line when verbose help is off.
fn subcommand_listing(table: &IndexMap<String, CommandEntry>, verbose: bool) -> String {
    if !verbose {
        return format!("{{{}}}  {}", table.keys().sorted().join(","), GENERIC_SUBCOMMAND_HELP);
    }

    let width = table.keys().map(|name| name.chars().count()).max().unwrap_or(0) + 2;
    table
        .iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(name, entry)| {
            format!("{:<width$}{}", name, entry.help(), width = width)
                .trim_end()
                .to_string()
        })
        .join("\n")
}

fn attach_subcommands(command: Command, table: &IndexMap<String, CommandEntry>, verbose: bool) -> Command {
    let listing = subcommand_listing(table, verbose);
    let after_help = format!(
        "Subcommands:\n{}",
        listing.lines().map(|line| format!("  {}", line)).join("\n")
    );

    command
        .subcommand_required(true)
        .allow_external_subcommands(true)
        .external_subcommand_value_parser(value_parser!(String))
        .subcommand_value_name("subcommand")
        .after_help(after_help)
}
