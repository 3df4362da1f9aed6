use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use watchrun::errors::{Result, WatchrunError};
use watchrun::watch::NotificationSource;

/// A recorded subscription-surface call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceCall {
    Subscribe(PathBuf),
    Unsubscribe(PathBuf),
}

/// A fake notification source that:
/// - records every subscribe/unsubscribe call
/// - tracks the currently subscribed set
/// - can be told to fail unsubscribe calls (for teardown-failure tests).
pub struct FakeSource {
    calls: Arc<Mutex<Vec<SourceCall>>>,
    active: Arc<Mutex<BTreeSet<PathBuf>>>,
    fail_unsubscribe: bool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            active: Arc::new(Mutex::new(BTreeSet::new())),
            fail_unsubscribe: false,
        }
    }

    /// Make every unsubscribe call return an error.
    pub fn failing_unsubscribe() -> Self {
        Self {
            fail_unsubscribe: true,
            ..Self::new()
        }
    }

    /// Shared handles for asserting after the source has been boxed away.
    pub fn handles(&self) -> (Arc<Mutex<Vec<SourceCall>>>, Arc<Mutex<BTreeSet<PathBuf>>>) {
        (Arc::clone(&self.calls), Arc::clone(&self.active))
    }
}

impl Default for FakeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSource for FakeSource {
    fn subscribe(&mut self, path: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SourceCall::Subscribe(path.to_path_buf()));
        self.active.lock().unwrap().insert(path.to_path_buf());
        Ok(())
    }

    fn unsubscribe(&mut self, path: &Path) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SourceCall::Unsubscribe(path.to_path_buf()));
        if self.fail_unsubscribe {
            return Err(WatchrunError::IoError(std::io::Error::other(
                "fake unsubscribe failure",
            )));
        }
        self.active.lock().unwrap().remove(path);
        Ok(())
    }
}
