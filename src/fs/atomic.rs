//! Atomic replacement of INI files.
//!
//! The merged text is written to a temporary file next to the target, synced
//! to disk, given the target's permissions, and renamed over the target. A
//! reader never observes a half-written configuration file.
//!
//! The temporary file is named `.{filename}.iniset.tmp` and lives in the same
//! directory as the target, so the rename never crosses filesystems. It may be
//! left behind if the process is killed between write and rename. A symlinked
//! target is resolved first, so the link survives and its target is replaced.

use crate::error::{IniError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`.
///
/// # Example
///
/// ```no_run
/// use iniset::fs::atomic_write;
///
/// atomic_write("settings.ini", "[server]\nport=8080\n")?;
/// # Ok::<(), iniset::IniError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let target = resolve_target(path.as_ref())?;
    let path = target.as_path();
    let temp_path = temp_path_for(path)?;

    write_and_sync(&temp_path, content.as_bytes())?;

    // New files keep the default mode; existing ones keep theirs.
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(&temp_path, metadata.permissions()).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            IniError::io(&temp_path, e)
        })?;
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        IniError::io(path, e)
    })?;

    log::trace!("replaced '{}' via '{}'", path.display(), temp_path.display());
    Ok(())
}

/// Overwrite `path` in place with `content`.
pub fn write_in_place<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, content).map_err(|e| IniError::io(path, e))
}

/// Follow symlinks to the file that is actually replaced. A target that does
/// not exist yet is used as given.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(IniError::io(path, e)),
    }
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let filename = target.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
        IniError::UserError(format!("invalid file path '{}'", target.display()))
    })?;

    Ok(parent.join(format!(".{}.iniset.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IniError::io(path, e))?;

    file.write_all(content)
        .and_then(|()| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(path);
            IniError::io(path, e)
        })
}
