//! CLI argument parsing for iniset.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use iniset::IniEntry;
use std::path::PathBuf;

/// iniset: update keys in INI files without disturbing the rest of the file.
///
/// Comments, blank lines and ordering are kept exactly as they were.
/// Existing keys are rewritten in place, missing keys are added at the end
/// of their section, and missing sections are appended to the file.
#[derive(Parser, Debug)]
#[command(name = "iniset")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for iniset.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set keys in an INI file.
    ///
    /// Entries are written as `key=value` for the default area or
    /// `[section]key=value` for a section.
    Set(SetArgs),
}

/// Arguments for the `set` command.
#[derive(Parser, Debug)]
pub struct SetArgs {
    /// INI file to update.
    pub file: PathBuf,

    /// Entries to set, as `key=value` or `[section]key=value`.
    #[arg(value_parser = parse_entry)]
    pub entries: Vec<IniEntry>,

    /// Load entries from a YAML or JSON entries file (applied first).
    #[arg(long, value_name = "CONFIG")]
    pub from: Option<PathBuf>,

    /// Print the merged file to stdout instead of writing it.
    #[arg(long)]
    pub dry_run: bool,

    /// Write nothing; exit with code 2 if the file would change.
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Treat a missing file as empty and create it.
    #[arg(long)]
    pub create: bool,

    /// Replace the file via a temporary file and rename instead of
    /// overwriting it in place.
    #[arg(long)]
    pub atomic: bool,
}

fn parse_entry(text: &str) -> Result<IniEntry, String> {
    text.parse::<IniEntry>().map_err(|e| e.to_string())
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
