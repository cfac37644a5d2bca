//! Diagnostic events emitted while merging.
//!
//! The merger never logs on its own; callers pass an optional
//! [`DiagnosticSink`] that receives a [`MergeEvent`] for every section it
//! enters or leaves and every entry it places.

use std::fmt;

/// Something the merger did to the line sequence.
///
/// `index` fields are zero-based positions in the line sequence at the time
/// of the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeEvent {
    /// A section referenced by an entry was missing and appended to the end.
    SectionCreated { section: String },

    /// A `[section]` header was reached.
    SectionStart { section: String, index: usize },

    /// The section ended; `inserted` new keys were spliced in at `index`.
    SectionEnd {
        section: String,
        index: usize,
        inserted: usize,
    },

    /// An existing `key=value` line was rewritten in place.
    EntryMatched {
        key: String,
        section: Option<String>,
        index: usize,
    },

    /// Unscoped entries without an existing line were inserted at `index`.
    DefaultEntriesPlaced { index: usize, count: usize },
}

impl fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEvent::SectionCreated { section } => {
                write!(f, "created missing [{}] section", section)
            }
            MergeEvent::SectionStart { section, index } => {
                write!(f, "start of [{}] section at line {}", section, index + 1)
            }
            MergeEvent::SectionEnd {
                section,
                index,
                inserted,
            } => write!(
                f,
                "end of [{}] section at line {} ({} new keys)",
                section,
                index + 1,
                inserted
            ),
            MergeEvent::EntryMatched {
                key,
                section: Some(section),
                index,
            } => write!(
                f,
                "found entry '{}' in section [{}] at line {}",
                key,
                section,
                index + 1
            ),
            MergeEvent::EntryMatched {
                key,
                section: None,
                index,
            } => write!(f, "found entry '{}' at line {}", key, index + 1),
            MergeEvent::DefaultEntriesPlaced { index, count } => {
                write!(f, "placed {} unscoped keys at line {}", count, index + 1)
            }
        }
    }
}

/// Receives merge diagnostics.
pub trait DiagnosticSink {
    fn record(&mut self, event: &MergeEvent);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&MergeEvent),
{
    fn record(&mut self, event: &MergeEvent) {
        (*self)(event)
    }
}

/// Forwards merge events to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn record(&mut self, event: &MergeEvent) {
        log::debug!(target: "iniset::merge", "{}", event);
    }
}
