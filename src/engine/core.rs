// src/engine/core.rs

//! Pure debounce core.
//!
//! This is a synchronous, deterministic state machine over the double buffer:
//! it decides *when* accumulated events are stable enough to dispatch and
//! hands out frozen batches one watch at a time. The async/IO-heavy shell
//! (`engine::runtime::Runtime`) feeds it events and the clock.
//!
//! The core is intended to be extensively tested without any Tokio, channels,
//! filesystem, or processes: every operation that depends on time takes an
//! explicit `Instant`.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::engine::queue::{Batch, EventQueue, WatchName};
use crate::watch::ChangeKind;

/// Debounce state machine: Idle (no unconsumed events) vs Accumulating (at
/// least one event in the listening buffer). Dispatch is allowed only after
/// the quiet period has elapsed since the *last* ingested event, so a
/// continuous burst of writes never dispatches until activity pauses.
#[derive(Debug)]
pub struct CoreEngine {
    queue: EventQueue,
    quiet_period: Duration,
    last_event: Option<Instant>,
    executing: bool,
}

impl CoreEngine {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            queue: EventQueue::new(),
            quiet_period,
            last_event: None,
            executing: false,
        }
    }

    /// Note that a raw event arrived, restarting the quiet-period timer.
    ///
    /// Called for every event delivered by the source, whether or not it
    /// routes to any watch.
    pub fn observe_event(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    /// Record a routed change into the listening buffer (first kind wins).
    pub fn record(&mut self, watch: &str, path: &Path, kind: ChangeKind) {
        self.queue.record(watch, path, kind);
    }

    /// The dispatch condition, evaluated on every scheduler tick:
    /// not currently executing, the gap since the last event exceeds the
    /// quiet period, and the listening buffer is non-empty.
    pub fn should_dispatch(&self, now: Instant) -> bool {
        if self.executing {
            return false;
        }
        let Some(last) = self.last_event else {
            return false;
        };
        now.duration_since(last) > self.quiet_period && self.queue.has_pending()
    }

    /// Start a dispatch cycle: swap the buffer labels and raise the
    /// re-entrancy guard. The frozen buffer is drained via [`next_batch`];
    /// the other buffer keeps accepting events concurrently.
    ///
    /// [`next_batch`]: CoreEngine::next_batch
    pub fn begin_dispatch(&mut self) {
        debug_assert!(!self.executing, "dispatch already in progress");
        self.queue.swap();
        self.executing = true;
    }

    /// Take the next watch's frozen batch, clearing its entry in the
    /// executing buffer.
    pub fn next_batch(&mut self) -> Option<(WatchName, Batch)> {
        self.queue.take_next_executing()
    }

    /// End the dispatch cycle, lowering the re-entrancy guard.
    pub fn finish_dispatch(&mut self) {
        self.executing = false;
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    /// Whether any unconsumed events sit in the listening buffer.
    pub fn has_pending(&self) -> bool {
        self.queue.has_pending()
    }
}
