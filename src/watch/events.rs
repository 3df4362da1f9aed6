// src/watch/events.rs

//! Change-event types delivered by the notification source.

use std::fmt;
use std::path::PathBuf;

use notify::event::{EventKind, ModifyKind};

/// The cause of a filesystem change, as the engine classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChangeKind {
    Create,
    Write,
    Remove,
    Rename,
    AttributeChange,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChangeKind::Create => "create",
            ChangeKind::Write => "write",
            ChangeKind::Remove => "remove",
            ChangeKind::Rename => "rename",
            ChangeKind::AttributeChange => "attribute-change",
        };
        f.write_str(s)
    }
}

/// A single `(path, kind)` change record. Not persisted; lives only inside a
/// queue buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

/// Classify a raw `notify` event kind.
///
/// Rename events surface as `Modify(Name(_))` on most platforms; metadata
/// changes map to [`ChangeKind::AttributeChange`]; any other modification is
/// a plain write. Access and unclassified events are dropped.
pub fn map_event_kind(kind: &EventKind) -> Option<ChangeKind> {
    match kind {
        EventKind::Create(_) => Some(ChangeKind::Create),
        EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
        EventKind::Modify(ModifyKind::Metadata(_)) => Some(ChangeKind::AttributeChange),
        EventKind::Modify(_) => Some(ChangeKind::Write),
        EventKind::Remove(_) => Some(ChangeKind::Remove),
        EventKind::Access(_) | EventKind::Any | EventKind::Other => None,
    }
}
