//! Exit code constants for the iniset CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, bad entry text, bad entries file)
//! - 2: `--check` found that the file would change
//! - 3: I/O failure reading or writing the target file
//! - 4: Internal merge invariant violated

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, malformed entry, or invalid entries file.
pub const USER_ERROR: i32 = 1;

/// The target file is not up to date with the requested entries.
pub const WOULD_CHANGE: i32 = 2;

/// The target file could not be read or written.
pub const IO_FAILURE: i32 = 3;

/// A scoped entry had no section to land in after the merge.
pub const MERGE_FAILURE: i32 = 4;
