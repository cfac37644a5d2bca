//! Error types for iniset.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for iniset operations.
#[derive(Error, Debug)]
pub enum IniError {
    /// A scoped entry was still pending when only unscoped entries should remain.
    #[error("section [{section}] not found in ini file")]
    SectionNotFound { section: String },

    /// Reading or writing the target file failed.
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry given as `[section]key=value` text could not be parsed.
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    /// The entries file could not be read, parsed or validated.
    #[error("invalid config: {0}")]
    Config(String),

    /// User provided invalid arguments.
    #[error("{0}")]
    UserError(String),

    /// `--check` found that merging would modify the file.
    #[error("'{}' is not up to date", .0.display())]
    WouldChange(PathBuf),
}

impl IniError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IniError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            IniError::SectionNotFound { .. } => exit_codes::MERGE_FAILURE,
            IniError::Io { .. } => exit_codes::IO_FAILURE,
            IniError::InvalidEntry(_) | IniError::Config(_) | IniError::UserError(_) => {
                exit_codes::USER_ERROR
            }
            IniError::WouldChange(_) => exit_codes::WOULD_CHANGE,
        }
    }
}

/// Result type alias for iniset operations.
pub type Result<T> = std::result::Result<T, IniError>;
