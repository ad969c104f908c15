// Sat Oct 17 2026 - Alex

use crate::error::{HandlerError, HandlerResult};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerConfig {
    pub prog: Option<String>,
    pub about: Option<String>,
    pub version: Option<String>,
    pub use_subcommand_help: bool,
    pub enable_autocompletion: bool,
    pub ignore_remainder: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            prog: None,
            about: None,
            version: None,
            use_subcommand_help: true,
            enable_autocompletion: false,
            ignore_remainder: false,
        }
    }
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prog(mut self, prog: impl Into<String>) -> Self {
        self.prog = Some(prog.into());
        self
    }

    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_subcommand_help(mut self, enabled: bool) -> Self {
        self.use_subcommand_help = enabled;
        self
    }

    pub fn with_autocompletion(mut self, enabled: bool) -> Self {
        self.enable_autocompletion = enabled;
        self
    }

    pub fn with_ignore_remainder(mut self, enabled: bool) -> Self {
        self.ignore_remainder = enabled;
        self
    }

    /// Applies a string-keyed option, as read from an embedding program's own
    /// configuration source.
    pub fn set_option(&mut self, key: &str, value: &str) -> HandlerResult<()> {
        match key {
            "prog" => self.prog = Some(value.to_string()),
            "about" => self.about = Some(value.to_string()),
            "version" => self.version = Some(value.to_string()),
            "use_subcommand_help" => self.use_subcommand_help = parse_bool(key, value)?,
            "enable_autocompletion" => self.enable_autocompletion = parse_bool(key, value)?,
            "ignore_remainder" => self.ignore_remainder = parse_bool(key, value)?,
            _ => return Err(HandlerError::UnexpectedOption(key.to_string())),
        }
        Ok(())
    }

    pub fn validate(&self) -> HandlerResult<()> {
        if let Some(prog) = &self.prog {
            if prog.trim().is_empty() {
                return Err(HandlerError::InvalidConfig("prog must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// The configured program name, or the file name of the running executable.
    pub fn program_name(&self) -> String {
        if let Some(prog) = &self.prog {
            return prog.clone();
        }

        std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    }
}

fn parse_bool(key: &str, value: &str) -> HandlerResult<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(HandlerError::InvalidOptionValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
