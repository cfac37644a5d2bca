//! MergeConfig struct definition.

use crate::entry::IniEntry;
use serde::{Deserialize, Serialize};

/// Contents of an entries file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Replace the target through a temporary file and rename instead of
    /// overwriting it in place.
    pub atomic: bool,

    /// Entries to merge, in order.
    pub entries: Vec<IniEntry>,
}
