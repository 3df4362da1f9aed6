// src/watch/tree.rs

//! Per-watch set of subscribed directories, kept in sync with the real tree.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::WatchSpec;
use crate::errors::Result;
use crate::watch::events::ChangeKind;
use crate::watch::source::NotificationSource;

/// Tracks, per watch name, which directories currently hold an active
/// subscription on the notification source. Grown by the initial tree walk
/// and by reconciliation after dispatch; shrunk only by reconciliation.
///
/// Invariant: every directory in a watch's set has an active subscription.
pub struct WatchTree {
    source: Box<dyn NotificationSource>,
    dirs: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl std::fmt::Debug for WatchTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchTree").field("dirs", &self.dirs).finish()
    }
}

impl WatchTree {
    pub fn new(source: Box<dyn NotificationSource>) -> Self {
        Self {
            source,
            dirs: BTreeMap::new(),
        }
    }

    /// Recursively walk the watch's source directory and subscribe every
    /// directory found. Files are not subscribed; their notifications arrive
    /// via the parent directory's subscription.
    pub fn initialize(&mut self, name: &str, spec: &WatchSpec) {
        info!(watch = %name, dir = %spec.source_dir.display(), "watching project");
        self.add_tree(name, spec, &spec.source_dir);
    }

    /// Walk `root` and `add` everything under it. Walk and subscription
    /// errors are logged and the entry skipped (the directory may have
    /// vanished between walk and subscribe).
    fn add_tree(&mut self, name: &str, spec: &WatchSpec, root: &Path) {
        for entry in WalkDir::new(root) {
            match entry {
                Ok(entry) => {
                    if let Err(err) = self.add(name, spec, entry.path()) {
                        warn!(
                            watch = %name,
                            path = ?entry.path(),
                            error = %err,
                            "skipping directory"
                        );
                    }
                }
                Err(err) => {
                    warn!(watch = %name, root = ?root, error = %err, "tree walk error");
                }
            }
        }
    }

    /// Subscribe a single path for the given watch.
    ///
    /// Returns an error if the path cannot be statted or the subscription
    /// fails; callers treat both as non-fatal. Excluded paths, non-directories
    /// and already-subscribed directories are skipped silently.
    pub fn add(&mut self, name: &str, spec: &WatchSpec, path: &Path) -> Result<()> {
        let meta = fs::metadata(path)?;
        if !meta.is_dir() {
            return Ok(());
        }
        if spec.is_excluded(path) {
            debug!(watch = %name, path = ?path, "excluded; not subscribing");
            return Ok(());
        }

        let dirs = self.dirs.entry(name.to_string()).or_default();
        if dirs.contains(path) {
            return Ok(());
        }

        self.source.subscribe(path)?;
        dirs.insert(path.to_path_buf());
        debug!(watch = %name, path = ?path, "subscribed directory");
        Ok(())
    }

    /// Unsubscribe `path` and every subscribed directory nested under it,
    /// rebuilding the watch's subscription set without them.
    ///
    /// An unsubscribe failure propagates: the subscription source is then in
    /// an inconsistent state and the process must not continue.
    pub fn remove(&mut self, name: &str, path: &Path) -> Result<()> {
        let Some(dirs) = self.dirs.get_mut(name) else {
            return Ok(());
        };

        let mut kept = BTreeSet::new();
        for dir in std::mem::take(dirs) {
            if dir.starts_with(path) {
                debug!(watch = %name, dir = ?dir, "unsubscribing removed directory");
                self.source.unsubscribe(&dir)?;
            } else {
                kept.insert(dir);
            }
        }
        *dirs = kept;
        Ok(())
    }

    /// Bring the subscription set back in line with the consumed events of
    /// one dispatch cycle.
    ///
    /// Remove and Rename both unsubscribe unconditionally; a rename that kept
    /// the directory in place relies on a later Create event to re-add it.
    /// A Create whose path still exists as a directory is walked so bulk
    /// moves (e.g. an extracted archive) are captured in one pass.
    pub fn reconcile(
        &mut self,
        name: &str,
        spec: &WatchSpec,
        events: &BTreeMap<PathBuf, ChangeKind>,
    ) -> Result<()> {
        for (path, kind) in events {
            if matches!(kind, ChangeKind::Remove | ChangeKind::Rename) {
                self.remove(name, path)?;
            }

            if *kind == ChangeKind::Create {
                if let Ok(meta) = fs::metadata(path) {
                    if meta.is_dir() {
                        self.add_tree(name, spec, path);
                    }
                }
            }
        }
        Ok(())
    }

    /// Snapshot of the currently subscribed directories for a watch.
    pub fn subscribed_dirs(&self, name: &str) -> Vec<PathBuf> {
        self.dirs
            .get(name)
            .map(|dirs| dirs.iter().cloned().collect())
            .unwrap_or_default()
    }
}
