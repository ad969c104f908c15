// Sun Oct 18 2026 - Alex

use clap_complete::Shell;
use std::io::{self, Write};

/// Environment variable naming the shell to emit a completion script for.
pub const COMPLETE_ENV: &str = "COMPLETE";

pub fn shell_from_name(name: &str) -> Option<Shell> {
    match name.trim().to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

pub fn requested_shell() -> Option<Shell> {
    std::env::var(COMPLETE_ENV)
        .ok()
        .and_then(|value| shell_from_name(&value))
}

pub fn write_completions(shell: Shell, command: &mut clap::Command, bin_name: &str, out: &mut dyn Write) {
    clap_complete::generate(shell, command, bin_name.to_string(), out);
}

/// Prints the completion script and exits when a shell asked for one.
/// Returns normally otherwise.
pub fn autocomplete(command: &mut clap::Command, bin_name: &str) {
    let Some(shell) = requested_shell() else {
        return;
    };

    log::debug!("Emitting {} completions for {}", shell, bin_name);
    write_completions(shell, command, bin_name, &mut io::stdout());
    std::process::exit(0);
}
