// src/config/registry.rs

//! Immutable-per-run view of the configured watches.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::model::{Config, WatchSpec};
use crate::errors::{Result, WatchrunError};

/// Which configured watches this run activates.
///
/// Parsed from the `--watch` flag: `*` means every configured watch, anything
/// else is a comma-separated list of names. Fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveSelection {
    All,
    Named(Vec<String>),
}

impl ActiveSelection {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == "*" {
            return ActiveSelection::All;
        }
        ActiveSelection::Named(
            raw.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// The registry binds a validated [`Config`] to the watch names selected for
/// this run. It is constructed once at startup and never mutated.
#[derive(Debug)]
pub struct WatchRegistry {
    specs: BTreeMap<String, WatchSpec>,
    active: Vec<String>,
    quiet_period: Duration,
}

impl WatchRegistry {
    /// Resolve the active-watch selection against the config.
    ///
    /// An explicitly named watch that does not exist in the config is a fatal
    /// configuration error.
    pub fn from_config(cfg: Config, selection: &ActiveSelection) -> Result<Self> {
        let active = match selection {
            ActiveSelection::All => cfg.watch.keys().cloned().collect(),
            ActiveSelection::Named(names) => {
                for name in names {
                    if !cfg.watch.contains_key(name) {
                        return Err(WatchrunError::UnknownWatch(name.clone()));
                    }
                }
                names.clone()
            }
        };

        Ok(Self {
            quiet_period: cfg.quiet_period(),
            specs: cfg.watch,
            active,
        })
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Iterate the active watches in selection order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &WatchSpec)> {
        self.active
            .iter()
            .filter_map(|name| self.specs.get(name).map(|spec| (name.as_str(), spec)))
    }

    /// Look up a watch by name (active or not).
    pub fn spec(&self, name: &str) -> Option<&WatchSpec> {
        self.specs.get(name)
    }
}
