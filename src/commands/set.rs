//! Implementation of the `iniset set` command.
//!
//! Collects entries from an optional entries file and the command line, then
//! merges them into the target file.

use crate::cli::SetArgs;
use iniset::config::MergeConfig;
use iniset::error::{IniError, Result};
use iniset::ini_file::{WriteOptions, write_ini_file_with};
use iniset::IniEntry;

/// Execute the `iniset set` command.
pub fn cmd_set(args: SetArgs) -> Result<()> {
    let (entries, config_atomic) = collect_entries(&args)?;

    let options = WriteOptions {
        atomic: args.atomic || config_atomic,
        dry_run: args.dry_run || args.check,
        create: args.create,
    };

    let outcome = write_ini_file_with(&args.file, &entries, &options)?;

    if args.check {
        if outcome.changed {
            return Err(IniError::WouldChange(args.file));
        }
        println!("{} is up to date", args.file.display());
        return Ok(());
    }

    if args.dry_run {
        print!("{}", outcome.content);
        return Ok(());
    }

    if outcome.changed {
        println!("Updated {} ({} entries)", args.file.display(), entries.len());
    } else {
        println!("{} is already up to date", args.file.display());
    }

    Ok(())
}

/// Entries file entries first, then positional ones.
fn collect_entries(args: &SetArgs) -> Result<(Vec<IniEntry>, bool)> {
    let mut entries = Vec::new();
    let mut atomic = false;

    if let Some(from) = &args.from {
        let config = MergeConfig::load(from)?;
        atomic = config.atomic;
        entries.extend(config.entries);
    }
    entries.extend(args.entries.iter().cloned());

    if entries.is_empty() {
        return Err(IniError::UserError(
            "no entries given.\n\n\
             Pass `key=value` or `[section]key=value` arguments, or --from <CONFIG>."
                .to_string(),
        ));
    }

    Ok((entries, atomic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn args(file: &Path) -> SetArgs {
        SetArgs {
            file: file.to_path_buf(),
            entries: Vec::new(),
            from: None,
            dry_run: false,
            check: false,
            create: false,
            atomic: false,
        }
    }

    fn ini_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("app.ini");
        fs::write(&path, "[Server]\nport=80\n").unwrap();
        path
    }

    #[test]
    fn set_updates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = ini_file(&temp_dir);
        let mut set_args = args(&path);
        set_args.entries = vec![IniEntry::scoped("Server", "port", "8080")];

        cmd_set(set_args).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[Server]\nport=8080\n");
    }

    #[test]
    fn set_without_entries_is_user_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = ini_file(&temp_dir);

        let err = cmd_set(args(&path)).unwrap_err();
        assert!(matches!(err, IniError::UserError(_)));
    }

    #[test]
    fn check_reports_pending_change_without_writing() {
        let temp_dir = TempDir::new().unwrap();
        let path = ini_file(&temp_dir);
        let mut set_args = args(&path);
        set_args.entries = vec![IniEntry::scoped("Server", "host", "0.0.0.0")];
        set_args.check = true;

        let err = cmd_set(set_args).unwrap_err();

        assert!(matches!(err, IniError::WouldChange(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[Server]\nport=80\n");
    }

    #[test]
    fn check_passes_when_up_to_date() {
        let temp_dir = TempDir::new().unwrap();
        let path = ini_file(&temp_dir);
        let mut set_args = args(&path);
        set_args.entries = vec![IniEntry::scoped("Server", "port", "80")];
        set_args.check = true;

        cmd_set(set_args).unwrap();
    }

    #[test]
    fn entries_file_is_applied_before_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let path = ini_file(&temp_dir);
        let config_path = temp_dir.path().join("entries.yaml");
        fs::write(
            &config_path,
            "entries:\n  - section: Server\n    key: port\n    value: \"9000\"\n",
        )
        .unwrap();

        let mut set_args = args(&path);
        set_args.from = Some(config_path);
        set_args.entries = vec![IniEntry::scoped("Server", "port", "7000")];

        let (entries, atomic) = collect_entries(&set_args).unwrap();
        assert!(!atomic);
        assert_eq!(entries[0].value, "9000");
        assert_eq!(entries[1].value, "7000");

        // The first entry consumes the key; the second lands as a new line.
        cmd_set(set_args).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[Server]\nport=9000\nport=7000\n"
        );
    }

    #[test]
    fn entries_file_can_request_atomic_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = ini_file(&temp_dir);
        let config_path = temp_dir.path().join("entries.yaml");
        fs::write(
            &config_path,
            "atomic: true\nentries:\n  - section: Server\n    key: port\n    value: \"81\"\n",
        )
        .unwrap();

        let mut set_args = args(&path);
        set_args.from = Some(config_path);

        let (_, atomic) = collect_entries(&set_args).unwrap();
        assert!(atomic);

        cmd_set(set_args).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[Server]\nport=81\n");
    }

    #[cfg(unix)]
    #[test]
    fn set_keeps_symlinked_file_linked() {
        let temp_dir = TempDir::new().unwrap();
        let real = ini_file(&temp_dir);
        let link = temp_dir.path().join("link.ini");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let mut set_args = args(&link);
        set_args.entries = vec![IniEntry::scoped("Server", "port", "8080")];

        cmd_set(set_args).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "[Server]\nport=8080\n");
    }
}
