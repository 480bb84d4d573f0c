use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// "GO" countdown: each pattern is held, then the bar goes dark for the gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    pub hold_ms: u64,
    pub gap_ms: u64,
    pub patterns: Vec<Vec<usize>>,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            hold_ms: 1800,
            gap_ms: 500,
            // "G" then "O"
            patterns: vec![vec![2, 4, 5, 7, 8], vec![1, 2, 4, 5, 7, 8]],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelebrationConfig {
    pub duration_ms: u64,
    pub flash_interval_ms: u64,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 10_000,
            flash_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FailureConfig {
    pub blinks: u32,
    pub blink_interval_ms: u64,
    pub pause_ms: u64,
    pub step_interval_ms: u64,
}

impl Default for FailureConfig {
    fn default() -> Self {
        Self {
            blinks: 3,
            blink_interval_ms: 200,
            pause_ms: 500,
            step_interval_ms: 200,
        }
    }
}

/// Device configuration. Every field falls back to its default when absent
/// from the JSON source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GripConfig {
    pub led_count: usize,
    pub max_raw: u32,
    pub tick_interval_ms: u64,
    pub cooldown_ms: u64,
    /// Play the countdown before every trial, not only the first of a
    /// session.
    pub replay_countdown: bool,
    pub countdown: CountdownConfig,
    pub celebration: CelebrationConfig,
    pub failure: FailureConfig,
}

impl Default for GripConfig {
    fn default() -> Self {
        Self {
            led_count: 10,
            max_raw: 65535,
            tick_interval_ms: 50,
            cooldown_ms: 200,
            replay_countdown: true,
            countdown: CountdownConfig::default(),
            celebration: CelebrationConfig::default(),
            failure: FailureConfig::default(),
        }
    }
}

impl GripConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.led_count == 0 {
            return Err(ConfigError::Invalid("led_count must be at least 1".into()));
        }
        if self.max_raw == 0 {
            return Err(ConfigError::Invalid("max_raw must be positive".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be positive".into(),
            ));
        }
        if self.celebration.flash_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "celebration.flash_interval_ms must be positive".into(),
            ));
        }
        for (n, pattern) in self.countdown.patterns.iter().enumerate() {
            if let Some(index) = pattern.iter().find(|i| **i >= self.led_count) {
                return Err(ConfigError::Invalid(format!(
                    "countdown pattern {n} lights LED {index}, bar has {}",
                    self.led_count
                )));
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}
