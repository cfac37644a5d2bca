//! Desired key/value state for an INI file.
//!
//! An [`IniEntry`] names a key, the value it should have, and optionally the
//! section it belongs to. Entries without a section target the default area
//! of the file, before the first section header.

use crate::error::{IniError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single desired `key=value` line, optionally scoped to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IniEntry {
    /// Section the key lives in. `None` (or empty) means the default area.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Key name, matched against the text left of the first `=`.
    pub key: String,

    /// Value written after the `=`.
    #[serde(default)]
    pub value: String,
}

impl IniEntry {
    /// Create an entry for the default area.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            section: None,
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an entry scoped to `section`.
    pub fn scoped(
        section: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            section: Some(section.into()),
            key: key.into(),
            value: value.into(),
        }
    }

    /// The section this entry targets, treating an empty name as unscoped.
    pub fn scope(&self) -> Option<&str> {
        self.section.as_deref().filter(|s| !s.is_empty())
    }

    /// Check that the entry produces exactly one well-formed line.
    ///
    /// The merger itself accepts anything; this is applied to entries coming
    /// from the command line or an entries file.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(IniError::InvalidEntry("key is empty".to_string()));
        }
        if self.key.contains('=') {
            return Err(IniError::InvalidEntry(format!(
                "key '{}' must not contain '='",
                self.key
            )));
        }
        if self.key.trim_start().starts_with(['#', '[']) {
            return Err(IniError::InvalidEntry(format!(
                "key '{}' would be read back as a comment or section header",
                self.key
            )));
        }
        if let Some(section) = self.scope()
            && (section.contains(']') || has_line_break(section))
        {
            return Err(IniError::InvalidEntry(format!(
                "section '{}' must not contain ']' or line breaks",
                section
            )));
        }
        if has_line_break(&self.key) || has_line_break(&self.value) {
            return Err(IniError::InvalidEntry(format!(
                "entry '{}' must not contain line breaks",
                self.key
            )));
        }
        Ok(())
    }

    /// Render the entry as the line it produces in the file.
    pub fn to_line(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

impl fmt::Display for IniEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope() {
            Some(section) => write!(f, "[{}]{}={}", section, self.key, self.value),
            None => write!(f, "{}={}", self.key, self.value),
        }
    }
}

/// Parses `key=value` or `[section]key=value`.
///
/// The value is everything after the first `=` and may itself contain `=`.
impl FromStr for IniEntry {
    type Err = IniError;

    fn from_str(s: &str) -> Result<Self> {
        let (section, rest) = match s.strip_prefix('[') {
            Some(after) => {
                let (name, rest) = after.split_once(']').ok_or_else(|| {
                    IniError::InvalidEntry(format!("'{}': missing closing ']'", s))
                })?;
                (Some(name.to_string()), rest)
            }
            None => (None, s),
        };

        let (key, value) = rest.split_once('=').ok_or_else(|| {
            IniError::InvalidEntry(format!("'{}': expected [section]key=value", s))
        })?;

        if key.is_empty() {
            return Err(IniError::InvalidEntry(format!("'{}': key is empty", s)));
        }

        let entry = Self {
            section: section.filter(|name| !name.is_empty()),
            key: key.to_string(),
            value: value.to_string(),
        };
        entry.validate()?;
        Ok(entry)
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\n', '\r'])
}
