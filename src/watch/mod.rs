// src/watch/mod.rs

//! Dynamic watch-set maintenance over the filesystem notification source.
//!
//! This module is responsible for:
//! - Classifying raw `notify` events into [`ChangeKind`]s.
//! - Wiring the cross-platform watcher into change/error channels.
//! - Growing and shrinking the set of subscribed directories as the real
//!   tree changes.
//!
//! It does **not** know about debouncing or command pipelines; it only keeps
//! subscriptions honest and delivers classified events.

pub mod events;
pub mod source;
pub mod tree;

pub use events::{map_event_kind, ChangeEvent, ChangeKind};
pub use source::{spawn_source, NotificationSource, NotifySource, SourceChannels};
pub use tree::WatchTree;
