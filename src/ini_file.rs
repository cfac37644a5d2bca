//! Read, merge and write back an INI file.
//!
//! The file is split on `\n`, merged with [`merge_lines`] and joined with `\n`
//! again, so a trailing newline survives as it was. There is no locking:
//! callers serialize merges per path.

use crate::entry::IniEntry;
use crate::error::{IniError, Result};
use crate::merge::{LogSink, merge_lines};
use std::io;
use std::path::Path;

/// Controls how [`write_ini_file_with`] touches the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Replace the file through a temporary file and rename instead of
    /// overwriting it in place.
    pub atomic: bool,

    /// Compute the merged text without writing it.
    pub dry_run: bool,

    /// Treat a missing file as empty instead of failing.
    pub create: bool,
}

/// Result of merging entries into a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Full merged text.
    pub content: String,

    /// Whether the merged text differs from what was on disk.
    pub changed: bool,
}

/// Merge `entries` into the INI file at `path` and write it back.
pub fn write_ini_file<P: AsRef<Path>>(path: P, entries: &[IniEntry]) -> Result<()> {
    write_ini_file_with(path, entries, &WriteOptions::default()).map(|_| ())
}

/// Merge `entries` into the INI file at `path` according to `options`.
///
/// The file is only written when the merged text differs from the original
/// and `dry_run` is off. A failed merge never writes anything.
pub fn write_ini_file_with<P: AsRef<Path>>(
    path: P,
    entries: &[IniEntry],
    options: &WriteOptions,
) -> Result<MergeOutcome> {
    let path = path.as_ref();
    let original = read_ini_file(path, options.create)?;

    let mut lines: Vec<String> = match &original {
        Some(text) => text.split('\n').map(str::to_owned).collect(),
        None => Vec::new(),
    };
    let mut sink = LogSink;
    merge_lines(&mut lines, entries, Some(&mut sink))?;
    if original.is_none() {
        tidy_new_file(&mut lines);
    }

    let content = lines.join("\n");
    let changed = original.as_deref() != Some(content.as_str());

    if !changed {
        log::info!("'{}' is already up to date", path.display());
    } else if options.dry_run {
        log::info!("'{}' would change (dry run)", path.display());
    } else {
        if options.atomic {
            crate::fs::atomic_write(path, &content)?;
        } else {
            crate::fs::write_in_place(path, &content)?;
        }
        log::info!("updated '{}' ({} entries)", path.display(), entries.len());
    }

    Ok(MergeOutcome { content, changed })
}

/// Read the file, or `None` when it is missing and `create` is set.
fn read_ini_file(path: &Path, create: bool) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            log::debug!("read {} bytes from '{}'", text.len(), path.display());
            Ok(Some(text))
        }
        Err(e) if create && e.kind() == io::ErrorKind::NotFound => {
            log::debug!("'{}' does not exist, starting empty", path.display());
            Ok(None)
        }
        Err(e) => Err(IniError::io(path, e)),
    }
}

/// A freshly created file starts at its first line and ends with a newline.
fn tidy_new_file(lines: &mut Vec<String>) {
    let leading = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading);
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = "# comment\n[Section]\nkey1=value1\nkey2=value2\n";

    fn sample_file(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("app.ini");
        fs::write(&path, SAMPLE).unwrap();
        path
    }

    #[test]
    fn writes_merged_content_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = sample_file(&temp_dir);

        write_ini_file(
            &path,
            &[
                IniEntry::scoped("Section", "key1", "some1"),
                IniEntry::new("top", "1"),
            ],
        )
        .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "# comment\ntop=1\n[Section]\nkey1=some1\nkey2=value2\n"
        );
    }

    #[test]
    fn unchanged_file_reports_no_change() {
        let temp_dir = TempDir::new().unwrap();
        let path = sample_file(&temp_dir);

        let outcome = write_ini_file_with(
            &path,
            &[IniEntry::scoped("Section", "key1", "value1")],
            &WriteOptions::default(),
        )
        .unwrap();

        assert!(!outcome.changed);
        assert_eq!(outcome.content, SAMPLE);
    }

    #[test]
    fn dry_run_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = sample_file(&temp_dir);
        let options = WriteOptions {
            dry_run: true,
            ..WriteOptions::default()
        };

        let outcome =
            write_ini_file_with(&path, &[IniEntry::scoped("Section", "key2", "x")], &options)
                .unwrap();

        assert!(outcome.changed);
        assert!(outcome.content.contains("key2=x"));
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
    }

    #[test]
    fn atomic_write_updates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = sample_file(&temp_dir);
        let options = WriteOptions {
            atomic: true,
            ..WriteOptions::default()
        };

        write_ini_file_with(&path, &[IniEntry::scoped("Section", "key2", "x")], &options)
            .unwrap();

        assert!(fs::read_to_string(&path).unwrap().contains("key2=x"));
    }

    #[cfg(unix)]
    #[test]
    fn writes_through_symlink_to_target() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.ini");
        let link = temp_dir.path().join("link.ini");
        fs::write(&real, "[S]\nk=1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        write_ini_file(&link, &[IniEntry::scoped("S", "k", "2")]).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "[S]\nk=2\n");
    }

    #[cfg(unix)]
    #[test]
    fn atomic_write_through_symlink_replaces_target() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real.ini");
        let link = temp_dir.path().join("link.ini");
        fs::write(&real, "[S]\nk=1\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let options = WriteOptions {
            atomic: true,
            ..WriteOptions::default()
        };

        write_ini_file_with(&link, &[IniEntry::scoped("S", "k", "2")], &options).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "[S]\nk=2\n");
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.ini");

        let err = write_ini_file(&path, &[IniEntry::new("a", "1")]).unwrap_err();
        assert!(matches!(err, IniError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn create_starts_from_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.ini");
        let options = WriteOptions {
            create: true,
            ..WriteOptions::default()
        };

        let outcome =
            write_ini_file_with(&path, &[IniEntry::scoped("Server", "port", "80")], &options)
                .unwrap();

        assert!(outcome.changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[Server]\nport=80\n");
    }

    #[test]
    fn create_with_unscoped_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.ini");
        let options = WriteOptions {
            create: true,
            ..WriteOptions::default()
        };

        write_ini_file_with(&path, &[IniEntry::new("debug", "true")], &options).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "debug=true\n");
    }
}
