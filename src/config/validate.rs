// src/config/validate.rs

use crate::config::model::{Config, RawConfig};
use crate::errors::{Result, WatchrunError};

impl TryFrom<RawConfig> for Config {
    type Error = crate::errors::WatchrunError;

    fn try_from(raw: RawConfig) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(Config::new_unchecked(raw.quiet_period_ms, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfig) -> Result<()> {
    ensure_has_watches(cfg)?;
    validate_quiet_period(cfg)?;
    validate_watches(cfg)?;
    Ok(())
}

fn ensure_has_watches(cfg: &RawConfig) -> Result<()> {
    if cfg.watch.is_empty() {
        return Err(WatchrunError::ConfigError(
            "config must contain at least one entry under \"watch\"".to_string(),
        ));
    }
    Ok(())
}

fn validate_quiet_period(cfg: &RawConfig) -> Result<()> {
    if cfg.quiet_period_ms == 0 {
        return Err(WatchrunError::ConfigError(
            "\"quietPeriodMs\" must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_watches(cfg: &RawConfig) -> Result<()> {
    for (name, spec) in cfg.watch.iter() {
        if spec.source_dir.as_os_str().is_empty() {
            return Err(WatchrunError::ConfigError(format!(
                "watch '{}' has an empty \"sourceDir\"",
                name
            )));
        }
        if !spec.source_dir.is_absolute() {
            return Err(WatchrunError::ConfigError(format!(
                "watch '{}' has a relative \"sourceDir\" ({:?}); an absolute path is required",
                name, spec.source_dir
            )));
        }
        if spec.pipelines.is_empty() {
            return Err(WatchrunError::ConfigError(format!(
                "watch '{}' has no \"pipelines\"",
                name
            )));
        }
        for (idx, pipeline) in spec.pipelines.iter().enumerate() {
            match pipeline.first() {
                None => {
                    return Err(WatchrunError::ConfigError(format!(
                        "watch '{}' pipeline #{} is empty",
                        name, idx
                    )));
                }
                Some(program) if program.is_empty() => {
                    return Err(WatchrunError::ConfigError(format!(
                        "watch '{}' pipeline #{} has an empty executable token",
                        name, idx
                    )));
                }
                Some(_) => {}
            }
        }
    }
    Ok(())
}
