// Sat Oct 17 2026 - Alex

use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid logging flag name: {0}")]
    InvalidLoggingFlag(String),

    #[error("Invalid logging level: {0}")]
    InvalidLogLevel(String),

    #[error("Unexpected configuration option: {0}")]
    UnexpectedOption(String),

    #[error("Invalid value for option {key}: {value}")]
    InvalidOptionValue { key: String, value: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid subcommand name: {0:?}")]
    InvalidSubcommandName(String),

    #[error("ArgumentHandler can only parse arguments once")]
    AlreadyParsed,

    #[error(transparent)]
    Parse(#[from] clap::Error),
}

impl HandlerError {
    pub fn is_config_error(&self) -> bool {
        !matches!(self, HandlerError::AlreadyParsed | HandlerError::Parse(_))
    }
}

// Lets `LogLevel` itself satisfy the same `TryInto` bound as `&str` and `log::Level`.
impl From<Infallible> for HandlerError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;
