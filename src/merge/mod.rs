//! Line-oriented merge of desired entries into INI text.
//!
//! The merger works on the raw lines of a file and only touches what it has
//! to: matching `key=value` lines are rewritten in place, missing keys are
//! spliced in at the end of their section, missing sections are appended to
//! the end of the file, and everything else (comments, blank lines, ordering)
//! is left exactly as it was.
//!
//! # Line rules
//!
//! - A line whose trimmed text starts with `#` is a comment and is skipped.
//! - A trimmed line of the form `[name]` is a section header.
//! - A section ends at the first line without `=` (blank line, header, bare
//!   text) or at the end of the file. Comments do not end a section.
//! - Any other line containing `=` is a `key=value` line; the key is the text
//!   left of the first `=`.
//!
//! # Example
//!
//! ```
//! use iniset::{IniEntry, merge_text};
//!
//! let text = "# settings\n[server]\nport=80\n";
//! let entries = [IniEntry::scoped("server", "port", "8080")];
//! let merged = merge_text(text, &entries, None)?;
//! assert_eq!(merged, "# settings\n[server]\nport=8080\n");
//! # Ok::<(), iniset::IniError>(())
//! ```

pub mod diagnostics;
mod pending;


pub use diagnostics::{DiagnosticSink, LogSink, MergeEvent};

use crate::entry::IniEntry;
use crate::error::Result;
use pending::PendingEntries;
use std::collections::HashSet;

/// Merge `entries` into `lines` in place.
///
/// Fails with [`IniError::SectionNotFound`](crate::IniError::SectionNotFound)
/// if a scoped entry could not be given a home; `lines` may already have
/// been modified when that happens.
pub fn merge_lines(
    lines: &mut Vec<String>,
    entries: &[IniEntry],
    sink: Option<&mut dyn DiagnosticSink>,
) -> Result<()> {
    let mut merger = Merger { sink };

    merger.ensure_sections(lines, entries);

    let mut pending = PendingEntries::new(entries);
    let first_section = merger.scan(lines, &mut pending);

    merger.place_unscoped(lines, &mut pending, first_section)
}

/// Merge `entries` into an owned line sequence and hand it back.
pub fn merge(mut lines: Vec<String>, entries: &[IniEntry]) -> Result<Vec<String>> {
    merge_lines(&mut lines, entries, None)?;
    Ok(lines)
}

/// Split `text` on `\n`, merge, and join the result with `\n`.
pub fn merge_text(
    text: &str,
    entries: &[IniEntry],
    sink: Option<&mut dyn DiagnosticSink>,
) -> Result<String> {
    let mut lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
    merge_lines(&mut lines, entries, sink)?;
    Ok(lines.join("\n"))
}

/// How a single line takes part in the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineKind {
    Comment,
    Header(String),
    Pair(String),
    Bare,
}

impl LineKind {
    fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.starts_with('#') {
            LineKind::Comment
        } else if let Some(name) = section_name(trimmed) {
            LineKind::Header(name.to_string())
        } else if let Some((key, _)) = trimmed.split_once('=') {
            LineKind::Pair(key.to_string())
        } else {
            LineKind::Bare
        }
    }

    fn ends_section(&self) -> bool {
        matches!(self, LineKind::Header(_) | LineKind::Bare)
    }
}

/// Extract `name` from a trimmed `[name]` header line.
fn section_name(trimmed: &str) -> Option<&str> {
    trimmed.strip_prefix('[')?.strip_suffix(']')
}

struct Merger<'s> {
    sink: Option<&'s mut dyn DiagnosticSink>,
}

impl Merger<'_> {
    fn emit(&mut self, event: MergeEvent) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.record(&event);
        }
    }

    /// Append a blank line and a header for every referenced section the
    /// file does not have yet, in order of first reference.
    fn ensure_sections(&mut self, lines: &mut Vec<String>, entries: &[IniEntry]) {
        let mut known: HashSet<String> = lines
            .iter()
            .filter_map(|line| section_name(line.trim()))
            .map(str::to_owned)
            .collect();

        for section in entries.iter().filter_map(IniEntry::scope) {
            if known.insert(section.to_string()) {
                lines.push(String::new());
                lines.push(format!("[{}]", section));
                self.emit(MergeEvent::SectionCreated {
                    section: section.to_string(),
                });
            }
        }
    }

    /// Walk the lines once, rewriting matches and flushing each section's
    /// missing keys at its boundary. Returns the index of the first header.
    fn scan(&mut self, lines: &mut Vec<String>, pending: &mut PendingEntries<'_>) -> Option<usize> {
        let mut first_section = None;
        let mut current: Option<String> = None;
        let mut idx = 0;

        while idx < lines.len() {
            let kind = LineKind::classify(&lines[idx]);

            // The boundary line is evaluated again once the section is closed.
            if kind.ends_section()
                && let Some(section) = current.take()
            {
                idx += self.close_section(lines, idx, &section, pending);
                continue;
            }

            match kind {
                LineKind::Comment | LineKind::Bare => {}
                LineKind::Header(section) => {
                    first_section.get_or_insert(idx);
                    self.emit(MergeEvent::SectionStart {
                        section: section.clone(),
                        index: idx,
                    });
                    current = Some(section);
                }
                LineKind::Pair(key) => {
                    if let Some(entry) = pending.take_match(&key, current.as_deref()) {
                        self.emit(MergeEvent::EntryMatched {
                            key: key.clone(),
                            section: current.clone(),
                            index: idx,
                        });
                        lines[idx] = format!("{}={}", key, entry.value);
                    }
                }
            }
            idx += 1;
        }

        if let Some(section) = current.take() {
            let end = lines.len();
            self.close_section(lines, end, &section, pending);
        }

        first_section
    }

    /// Insert the pending keys of `section` before `at`. Returns how many
    /// lines were inserted.
    fn close_section(
        &mut self,
        lines: &mut Vec<String>,
        at: usize,
        section: &str,
        pending: &mut PendingEntries<'_>,
    ) -> usize {
        let new_lines: Vec<String> = pending
            .take_section(section)
            .into_iter()
            .map(IniEntry::to_line)
            .collect();
        let inserted = new_lines.len();

        lines.splice(at..at, new_lines);
        self.emit(MergeEvent::SectionEnd {
            section: section.to_string(),
            index: at,
            inserted,
        });

        inserted
    }

    /// Place leftover unscoped entries before the first header, or at the end
    /// of a file without sections.
    fn place_unscoped(
        &mut self,
        lines: &mut Vec<String>,
        pending: &mut PendingEntries<'_>,
        first_section: Option<usize>,
    ) -> Result<()> {
        let defaults = pending.take_unscoped()?;
        if defaults.is_empty() {
            return Ok(());
        }

        let at = first_section.unwrap_or(lines.len());
        self.emit(MergeEvent::DefaultEntriesPlaced {
            index: at,
            count: defaults.len(),
        });
        lines.splice(at..at, defaults.into_iter().map(IniEntry::to_line));

        Ok(())
    }
}
