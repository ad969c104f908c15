// Mon Oct 19 2026 - Alex

use arghandler::{
    registry, ArgumentHandler, CommandRegistry, Context, HandlerConfig, HandlerResult, LogLevel,
};
use clap::{value_parser, Arg, Command};
use colored::Colorize;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "[!]".red(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let registry = registry::global();
    registry.install(&[echo::register, add::register])?;

    let config = HandlerConfig::new()
        .with_about("Demo of subcommand dispatch with arghandler")
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_autocompletion(true);

    let mut handler = ArgumentHandler::with_config(config)?;
    handler.set_logging_argument(&["-L", "--log-level"], LogLevel::Warning)?;
    handler.run_env()?;

    Ok(())
}

mod echo {
    use super::*;

    pub fn register(registry: &CommandRegistry) -> HandlerResult<()> {
        registry.register("echo", echo, "Print the arguments back")
    }

    fn echo(_parser: Command, _context: &Context, args: &[String]) -> anyhow::Result<()> {
        log::info!("echo called with {} argument(s)", args.len());
        println!("{}", args.join(" "));
        Ok(())
    }
}

mod add {
    use super::*;

    pub fn register(registry: &CommandRegistry) -> HandlerResult<()> {
        registry.register("add", add, "Add numbers together")
    }

    fn add(parser: Command, _context: &Context, args: &[String]) -> anyhow::Result<()> {
        let matches = parser
            .about("Add numbers together")
            .arg(
                Arg::new("numbers")
                    .num_args(1..)
                    .required(true)
                    .allow_negative_numbers(true)
                    .value_parser(value_parser!(f64)),
            )
            .get_matches_from(args);

        let sum: f64 = matches
            .get_many::<f64>("numbers")
            .into_iter()
            .flatten()
            .sum();

        log::debug!("add computed {}", sum);
        println!("{}", sum.to_string().green());
        Ok(())
    }
}
