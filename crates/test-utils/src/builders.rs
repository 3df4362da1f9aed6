#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::Path;

use watchrun::config::{Config, RawConfig, WatchSpec};

/// Builder for [`Config`] to simplify test setup.
pub struct ConfigBuilder {
    config: RawConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfig {
                quiet_period_ms: 500,
                watch: BTreeMap::new(),
            },
        }
    }

    pub fn quiet_period_ms(mut self, ms: u64) -> Self {
        self.config.quiet_period_ms = ms;
        self
    }

    pub fn with_watch(mut self, name: &str, spec: WatchSpec) -> Self {
        self.config.watch.insert(name.to_string(), spec);
        self
    }

    pub fn build(self) -> Config {
        Config::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`WatchSpec`].
pub struct WatchSpecBuilder {
    spec: WatchSpec,
}

impl WatchSpecBuilder {
    pub fn new(source_dir: impl AsRef<Path>) -> Self {
        Self {
            spec: WatchSpec {
                source_dir: source_dir.as_ref().to_path_buf(),
                exclude: vec![],
                pipelines: vec![],
                parameters: BTreeMap::new(),
            },
        }
    }

    pub fn exclude(mut self, prefix: impl AsRef<Path>) -> Self {
        self.spec.exclude.push(prefix.as_ref().to_path_buf());
        self
    }

    pub fn pipeline(mut self, tokens: &[&str]) -> Self {
        self.spec
            .pipelines
            .push(tokens.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn parameter(mut self, name: &str, value: &str) -> Self {
        self.spec
            .parameters
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn build(self) -> WatchSpec {
        self.spec
    }
}
