// src/engine/queue.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::watch::ChangeKind;

/// Public type alias for watch names throughout the engine.
pub type WatchName = String;

/// Per-buffer contents: watch name -> changed path -> first-observed kind.
pub type Batch = BTreeMap<PathBuf, ChangeKind>;
type BufferMap = BTreeMap<WatchName, Batch>;

/// Label for one of the two queue buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BufferLabel {
    #[default]
    A,
    B,
}

impl BufferLabel {
    fn other(self) -> Self {
        match self {
            BufferLabel::A => BufferLabel::B,
            BufferLabel::B => BufferLabel::A,
        }
    }
}

/// The double buffer: two explicit named containers plus a single mutable
/// "which is listening" indicator. Exactly one buffer accepts new events at
/// any time; the other is drained by dispatch. Labels swap atomically at
/// dispatch start.
///
/// Invariant: a path's kind in a buffer is the *first* kind observed for that
/// path since the buffer was last cleared. Later events for the same path in
/// the same window are dropped, preserving the triggering cause (a create
/// followed by writes still reports as create).
#[derive(Debug, Default)]
pub struct EventQueue {
    a: BufferMap,
    b: BufferMap,
    listening: BufferLabel,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listening_label(&self) -> BufferLabel {
        self.listening
    }

    /// Record a change for a watch into the listening buffer, first kind
    /// wins.
    pub fn record(&mut self, watch: &str, path: &Path, kind: ChangeKind) {
        self.buffer_mut(self.listening)
            .entry(watch.to_string())
            .or_default()
            .entry(path.to_path_buf())
            .or_insert(kind);
    }

    /// True if the listening buffer holds at least one event for any watch.
    pub fn has_pending(&self) -> bool {
        self.buffer(self.listening)
            .values()
            .any(|paths| !paths.is_empty())
    }

    /// Swap which buffer is listening. The previously listening buffer is
    /// frozen for draining; the other starts accepting events.
    pub fn swap(&mut self) {
        self.listening = self.listening.other();
        debug!(listening = ?self.listening, "queue buffers swapped");
    }

    /// Take (and thereby clear) the next non-empty watch entry from the
    /// executing buffer. Returns `None` once the buffer is drained.
    pub fn take_next_executing(&mut self) -> Option<(WatchName, Batch)> {
        let executing = self.buffer_mut(self.listening.other());
        while let Some((watch, paths)) = executing.pop_first() {
            if !paths.is_empty() {
                return Some((watch, paths));
            }
        }
        None
    }

    fn buffer(&self, label: BufferLabel) -> &BufferMap {
        match label {
            BufferLabel::A => &self.a,
            BufferLabel::B => &self.b,
        }
    }

    fn buffer_mut(&mut self, label: BufferLabel) -> &mut BufferMap {
        match label {
            BufferLabel::A => &mut self.a,
            BufferLabel::B => &mut self.b,
        }
    }
}
