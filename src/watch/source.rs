// src/watch/source.rs

use std::path::Path;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;
use crate::watch::events::{map_event_kind, ChangeEvent};

/// The subscription surface of the OS-level notification primitive.
///
/// Production code uses [`NotifySource`]; tests can provide their own
/// implementation that records subscribe/unsubscribe calls instead of talking
/// to the OS.
pub trait NotificationSource: Send {
    /// Start delivering change events for a single directory (non-recursive).
    fn subscribe(&mut self, path: &Path) -> Result<()>;

    /// Stop delivering change events for a directory.
    fn unsubscribe(&mut self, path: &Path) -> Result<()>;
}

/// Receiving ends of the two delivery channels: change events and
/// asynchronous source errors, kept separate per the source contract.
pub struct SourceChannels {
    pub changes: mpsc::UnboundedReceiver<ChangeEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

/// Real notification source over `notify::RecommendedWatcher`.
///
/// Each watched directory is a distinct non-recursive subscription; the
/// watch tree decides which directories are covered. Dropping this value
/// stops all delivery.
pub struct NotifySource {
    watcher: RecommendedWatcher,
}

impl std::fmt::Debug for NotifySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifySource").finish()
    }
}

/// Create the notification source and its delivery channels.
///
/// The `notify` callback runs on the watcher's own thread; it classifies the
/// event kind and forwards one [`ChangeEvent`] per affected path into the
/// unbounded channel, so the callback never blocks.
pub fn spawn_source() -> Result<(NotifySource, SourceChannels)> {
    let (change_tx, change_rx) = mpsc::unbounded_channel::<ChangeEvent>();
    let (error_tx, error_rx) = mpsc::unbounded_channel::<notify::Error>();

    let watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                let Some(kind) = map_event_kind(&event.kind) else {
                    return;
                };
                for path in event.paths {
                    if change_tx.send(ChangeEvent { path, kind }).is_err() {
                        // Receiver gone; nothing useful left to do here.
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = error_tx.send(err);
            }
        },
        Config::default(),
    )?;

    Ok((
        NotifySource { watcher },
        SourceChannels {
            changes: change_rx,
            errors: error_rx,
        },
    ))
}

impl NotificationSource for NotifySource {
    fn subscribe(&mut self, path: &Path) -> Result<()> {
        debug!(path = ?path, "subscribing directory");
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        Ok(())
    }

    fn unsubscribe(&mut self, path: &Path) -> Result<()> {
        debug!(path = ?path, "unsubscribing directory");
        self.watcher.unwatch(path)?;
        Ok(())
    }
}
