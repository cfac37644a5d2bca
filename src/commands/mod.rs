//! Command implementations for iniset.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations.

mod set;

use crate::cli::Command;
use iniset::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Set(args) => set::cmd_set(args),
    }
}
