use crate::error::Result;
use crate::task::{Ticks, MAX_DELAY};
use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Load config from a specific TOML file
pub fn load_toml_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    Ok(config)
}

/// Load config from a specific YAML file
pub fn load_yaml_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config = Config::builder()
        .add_source(File::from(path.as_ref()).format(FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    Ok(config)
}

/// Resolve config placeholder like ${app.period} or ${app.period:500ms}
pub fn resolve_config_value(value: &str, config: &Config) -> Result<String> {
    let Some(inner) = value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Ok(value.to_string());
    };

    // ${key:default}
    if let Some((key, default_value)) = inner.split_once(':') {
        match config.get_string(key) {
            Ok(resolved) => Ok(resolved),
            Err(_) => Ok(default_value.to_string()),
        }
    } else {
        Ok(config.get_string(inner)?)
    }
}

/// Scheduler settings, read from the `[scheduler]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Timestamp ticks per second. Used to turn "500ms"-style durations
    /// into ticks and ticks into host sleeps.
    pub tick_hz: u32,
    /// Ticks the runner sleeps when a cycle reports no bound.
    pub idle_sleep: Ticks,
    /// Upper bound on a single runner sleep.
    pub max_sleep: Ticks,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_hz: 1000,
            idle_sleep: 1000,
            max_sleep: MAX_DELAY,
        }
    }
}

impl SchedulerConfig {
    /// Read the `scheduler` table, falling back to defaults when absent.
    ///
    /// A `tick_hz` of zero is rejected: no duration could be expressed in
    /// ticks and the host clock would never advance.
    pub fn from_config(config: &Config) -> Result<Self> {
        let parsed = match config.get::<SchedulerConfig>("scheduler") {
            Ok(parsed) => parsed,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => return Err(e.into()),
        };
        if parsed.tick_hz == 0 {
            let message = "scheduler.tick_hz must be greater than zero".to_string();
            return Err(ConfigError::Message(message).into());
        }
        Ok(parsed)
    }

    /// Host duration of `ticks` at this tick rate.
    pub fn ticks_to_duration(&self, ticks: Ticks) -> Duration {
        if self.tick_hz == 0 {
            return Duration::ZERO;
        }
        let nanos = u64::from(ticks) * 1_000_000_000 / u64::from(self.tick_hz);
        Duration::from_nanos(nanos)
    }
}
