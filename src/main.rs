//! iniset: update keys in INI files while preserving everything else.
//!
//! This is the main entry point for the `iniset` CLI. It parses arguments,
//! installs the logger, dispatches to the command handler, and maps errors to
//! exit codes.

mod cli;
mod commands;

use cli::Cli;
use env_logger::Env;
use iniset::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // RUST_LOG wins over -v when both are present.
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(cli.verbose)))
        .format_timestamp(None)
        .init();

    match commands::dispatch(cli.command) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            log::debug!("command failed: {:?}", err);
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
