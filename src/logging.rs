// Sat Oct 17 2026 - Alex

use crate::error::HandlerError;
use crate::handler::ParsedArgs;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// Severity accepted by a logging-level flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum LogLevel {
    #[value(name = "DEBUG")]
    Debug,
    #[value(name = "INFO")]
    Info,
    #[value(name = "WARNING")]
    Warning,
    #[value(name = "ERROR")]
    Error,
    #[value(name = "CRITICAL")]
    Critical,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        }
    }

    /// `log` has nothing above `Error`, so CRITICAL shares its threshold.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => log::LevelFilter::Error,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = HandlerError;

    fn from_str(s: &str) -> Result<Self, HandlerError> {
        LogLevel::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| HandlerError::InvalidLogLevel(s.to_string()))
    }
}

impl TryFrom<&str> for LogLevel {
    type Error = HandlerError;

    fn try_from(s: &str) -> Result<Self, HandlerError> {
        s.parse()
    }
}

impl TryFrom<log::Level> for LogLevel {
    type Error = HandlerError;

    fn try_from(level: log::Level) -> Result<Self, HandlerError> {
        match level {
            log::Level::Debug => Ok(LogLevel::Debug),
            log::Level::Info => Ok(LogLevel::Info),
            log::Level::Warn => Ok(LogLevel::Warning),
            log::Level::Error => Ok(LogLevel::Error),
            log::Level::Trace => Err(HandlerError::InvalidLogLevel(level.to_string())),
        }
    }
}

pub type LogConfigFn = Box<dyn Fn(LogLevel, &ParsedArgs)>;

pub(crate) struct LoggingArgument {
    pub id: String,
    pub default_level: LogLevel,
    pub configurator: LogConfigFn,
}

/// Installs an `env_logger` at `level` and raises or lowers the global threshold.
pub fn default_log_config(level: LogLevel, _args: &ParsedArgs) {
    let filter = level.to_level_filter();

    // try_init fails once a logger is installed; the threshold below still applies.
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .format_timestamp(None)
        .try_init();

    log::set_max_level(filter);
}

/// Splits flag spellings into (id, shorts, longs). The id is the longest
/// spelling without its leading dashes.
pub(crate) fn split_flag_names(names: &[&str]) -> Result<(String, Vec<char>, Vec<String>), HandlerError> {
    if names.is_empty() {
        return Err(HandlerError::InvalidLoggingFlag(
            "at least one flag name is required".to_string(),
        ));
    }

    let mut id = String::new();
    let mut shorts = Vec::new();
    let mut longs = Vec::new();

    for name in names {
        let stripped = if let Some(long) = name.strip_prefix("--") {
            if long.is_empty() {
                return Err(HandlerError::InvalidLoggingFlag(name.to_string()));
            }
            longs.push(long.to_string());
            long
        } else if let Some(short) = name.strip_prefix('-') {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c != '-' => shorts.push(c),
                _ => return Err(HandlerError::InvalidLoggingFlag(name.to_string())),
            }
            short
        } else {
            return Err(HandlerError::InvalidLoggingFlag(format!(
                "{} (flag names must start with '-')",
                name
            )));
        };

        if stripped.len() > id.len() {
            id = stripped.to_string();
        }
    }

    Ok((id, shorts, longs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names_round_trip() {
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
    }

    #[test]
    fn test_unknown_level_name() {
        assert!(matches!(
            "VERBOSE".parse::<LogLevel>(),
            Err(HandlerError::InvalidLogLevel(_))
        ));
        assert!("debug".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_trace_is_outside_the_set() {
        assert!(LogLevel::try_from(log::Level::Trace).is_err());
        assert_eq!(LogLevel::try_from(log::Level::Warn).unwrap(), LogLevel::Warning);
    }

    #[test]
    fn test_try_into_from_name() {
        let level: LogLevel = "CRITICAL".try_into().unwrap();
        assert_eq!(level, LogLevel::Critical);

        let err = TryInto::<LogLevel>::try_into("LOUD").unwrap_err();
        assert!(matches!(err, HandlerError::InvalidLogLevel(ref name) if name == "LOUD"));
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(LogLevel::Debug.to_level_filter(), log::LevelFilter::Debug);
        assert_eq!(LogLevel::Warning.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Critical.to_level_filter(), log::LevelFilter::Error);
    }

    #[test]
    fn test_split_flag_names() {
        let (id, shorts, longs) = split_flag_names(&["-L", "--logging"]).unwrap();
        assert_eq!(id, "logging");
        assert_eq!(shorts, vec!['L']);
        assert_eq!(longs, vec!["logging".to_string()]);
    }

    #[test]
    fn test_split_flag_names_short_only() {
        let (id, shorts, longs) = split_flag_names(&["-v"]).unwrap();
        assert_eq!(id, "v");
        assert_eq!(shorts, vec!['v']);
        assert!(longs.is_empty());
    }

    #[test]
    fn test_split_flag_names_rejects_positional_spelling() {
        assert!(matches!(
            split_flag_names(&["-L", "logging"]),
            Err(HandlerError::InvalidLoggingFlag(_))
        ));
        assert!(split_flag_names(&["-log"]).is_err());
        assert!(split_flag_names(&[]).is_err());
    }
}
