// Mon Oct 19 2026 - Alex

pub mod completion;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod registry;

pub use config::HandlerConfig;
pub use error::{HandlerError, HandlerResult};
pub use handler::{ArgumentHandler, CommandEntry, CommandFn, Context, ParsedArgs};
pub use logging::{default_log_config, LogLevel};
pub use registry::{reset_registered_subcommands, subcmd, CommandRegistry, RegisterFn};
