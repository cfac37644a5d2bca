//! Update keys in INI files in place.
//!
//! The core is [`merge_lines`], which reconciles a list of desired
//! [`IniEntry`] values against the existing lines of a file: keys that exist
//! are rewritten where they are, missing keys are added at the end of their
//! section, missing sections are appended, and comments, blank lines and
//! ordering are preserved. [`write_ini_file`] wraps it with file I/O.

pub mod config;
pub mod entry;
pub mod error;
pub mod exit_codes;
pub mod fs;
pub mod ini_file;
pub mod merge;

pub use entry::IniEntry;
pub use error::{IniError, Result};
pub use ini_file::{MergeOutcome, WriteOptions, write_ini_file, write_ini_file_with};
pub use merge::{DiagnosticSink, LogSink, MergeEvent, merge, merge_lines, merge_text};
