// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration as deserialized straight from a JSON file.
///
/// ```json
/// {
///   "quietPeriodMs": 500,
///   "watch": {
///     "backend": {
///       "sourceDir": "/home/me/proj/backend",
///       "exclude": ["/home/me/proj/backend/target"],
///       "pipelines": [["cargo", "build"]],
///       "parameters": {"dest": "/srv/deploy"}
///     }
///   }
/// }
/// ```
///
/// This type carries exactly what the file says; use
/// [`Config::try_from`] to turn it into a validated [`Config`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    /// Minimum idle time after the last filesystem event before accumulated
    /// events are dispatched, in milliseconds.
    #[serde(default = "default_quiet_period_ms")]
    pub quiet_period_ms: u64,

    /// All watches, keyed by watch name.
    #[serde(default)]
    pub watch: BTreeMap<String, WatchSpec>,
}

fn default_quiet_period_ms() -> u64 {
    500
}

/// Validated configuration. Immutable after load; the engine never sees an
/// unvalidated config.
#[derive(Debug, Clone)]
pub struct Config {
    pub quiet_period_ms: u64,
    pub watch: BTreeMap<String, WatchSpec>,
}

impl Config {
    /// Construct without validation. Only `validate.rs` (via `TryFrom`) and
    /// test builders should call this.
    pub fn new_unchecked(quiet_period_ms: u64, watch: BTreeMap<String, WatchSpec>) -> Self {
        Self {
            quiet_period_ms,
            watch,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms)
    }
}

/// A single watch: one source directory tree bound to one or more command
/// pipelines.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchSpec {
    /// Absolute root of the watched tree.
    pub source_dir: PathBuf,

    /// Path prefixes that are never subscribed. Compared component-wise, so
    /// an entry `/a/build` covers `/a/build` and everything under it but not
    /// `/a/build2`.
    #[serde(default)]
    pub exclude: Vec<PathBuf>,

    /// Ordered command pipelines; each is an argv list whose first token is
    /// the executable. Tokens may contain `{{Name}}` placeholders.
    pub pipelines: Vec<Vec<String>>,

    /// Free-form named parameters available to placeholder substitution.
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl WatchSpec {
    /// Two-tier parameter lookup: well-known fields first, then the open
    /// `parameters` map. Returns `None` for names known to neither tier.
    pub fn parameter(&self, name: &str) -> Option<String> {
        match name {
            "sourceDir" => Some(self.source_dir.to_string_lossy().into_owned()),
            _ => self.parameters.get(name).cloned(),
        }
    }

    /// Whether `path` falls under any exclude prefix.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.exclude.iter().any(|prefix| path.starts_with(prefix))
    }
}
