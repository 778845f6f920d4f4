use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV: &str = "DASHBOARD_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "dashboard.json";
/// Upper bound for `seconds_per_epoch`: one day.
const MAX_SECONDS_PER_EPOCH: u64 = 86_400;

/// Runtime knobs for the dashboard, read once at startup.
///
/// Every field has a default, so an empty JSON object is a valid file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Period between simulator ticks, in milliseconds.
    pub tick_ms: u64,
    /// Synthetic wall-clock cost of one epoch, in seconds.
    pub seconds_per_epoch: u64,
    /// Upper bound (exclusive) of the noise added to the loss each tick.
    pub loss_jitter: f64,
    /// Upper bound (exclusive) of the noise added to the accuracy each tick.
    pub accuracy_jitter: f64,
    pub max_epochs: u32,
    pub max_batch_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            seconds_per_epoch: 3,
            loss_jitter: 0.1,
            accuracy_jitter: 3.0,
            max_epochs: 1000,
            max_batch_size: 512,
        }
    }
}

impl Settings {
    /// Loads settings from `$DASHBOARD_CONFIG`, falling back to
    /// `./dashboard.json` and then to the defaults.
    ///
    /// # Errors
    /// Returns an error if an explicitly named file is missing, or if any
    /// file found cannot be parsed.
    pub fn load() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    log::debug!("no {DEFAULT_CONFIG_PATH} found, using default settings");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Reads and parses a JSON settings file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read settings '{}'", path.display()))?;
        let settings = Self::from_json(&content)
            .with_context(|| format!("invalid settings '{}'", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parses settings from a JSON document.
    ///
    /// # Errors
    /// Returns an error on malformed JSON, unknown keys, a zero tick period, or an
    /// epoch cost above one day.
    pub fn from_json(content: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(content)?;
        anyhow::ensure!(settings.tick_ms > 0, "tick_ms must be greater than zero");
        anyhow::ensure!(
            settings.seconds_per_epoch <= MAX_SECONDS_PER_EPOCH,
            "seconds_per_epoch must be at most {MAX_SECONDS_PER_EPOCH}, got {}",
            settings.seconds_per_epoch
        );
        anyhow::ensure!(settings.max_epochs > 0, "max_epochs must be greater than zero");
        anyhow::ensure!(
            settings.max_batch_size > 0,
            "max_batch_size must be greater than zero"
        );
        Ok(settings)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
