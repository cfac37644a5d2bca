//! The set of entries not yet written to the file.

use crate::entry::IniEntry;
use crate::error::{IniError, Result};

/// Entries still waiting for a line, in caller order.
///
/// Every entry leaves the set exactly once: matched to an existing line,
/// flushed at the end of its section, or placed in the default area.
#[derive(Debug)]
pub(crate) struct PendingEntries<'a> {
    entries: Vec<&'a IniEntry>,
}

impl<'a> PendingEntries<'a> {
    pub(crate) fn new(entries: &'a [IniEntry]) -> Self {
        Self {
            entries: entries.iter().collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Remove the first entry for `key`.
    ///
    /// Inside a section only entries scoped to it match. With no current
    /// section the entry's own section is not considered.
    pub(crate) fn take_match(&mut self, key: &str, section: Option<&str>) -> Option<&'a IniEntry> {
        let pos = self.entries.iter().position(|entry| {
            entry.key == key && section.is_none_or(|name| entry.scope() == Some(name))
        })?;
        Some(self.entries.remove(pos))
    }

    /// Remove every entry scoped to `section`.
    pub(crate) fn take_section(&mut self, section: &str) -> Vec<&'a IniEntry> {
        let (taken, rest): (Vec<_>, Vec<_>) = self
            .entries
            .drain(..)
            .partition(|entry| entry.scope() == Some(section));
        self.entries = rest;
        taken
    }

    /// Remove everything left, all of which must be unscoped.
    pub(crate) fn take_unscoped(&mut self) -> Result<Vec<&'a IniEntry>> {
        if let Some(section) = self.entries.iter().find_map(|entry| entry.scope()) {
            return Err(IniError::SectionNotFound {
                section: section.to_string(),
            });
        }
        Ok(std::mem::take(&mut self.entries))
    }
}
