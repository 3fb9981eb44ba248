//! Configuration system
//!
//! Handles TOML config file parsing and CLI argument merging. The built-in
//! defaults reproduce the historical trigger levels; the file only exists to
//! override them.

pub mod builder;
pub mod file;

pub use builder::ConfigBuilder;
pub use file::ConfigFile;

use crate::alerts::ThresholdPolicy;
use crate::domain::TrackedResource;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// CPU monitor settings
    pub cpu: MonitorSection,
    /// RAM monitor settings
    pub ram: MonitorSection,
    /// Disk monitor settings
    pub disc: MonitorSection,
    /// Notification channel toggles
    pub notify: NotifyConfig,
}

/// General configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,
    /// Sampling interval in seconds
    pub interval_seconds: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            interval_seconds: 20,
        }
    }
}

/// Per-resource monitor overrides.
///
/// Every field is optional; unset fields fall back to the built-in policy for
/// that resource.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MonitorSection {
    /// Primary trigger level in `[0, 1]`
    pub threshold: Option<f64>,
    /// Swap pressure trigger level (RAM only)
    pub swap_threshold: Option<f64>,
    /// Consecutive over-threshold ticks before the first fire
    pub baseline_fire_count: Option<u32>,
    /// Firing bar increase after each fire
    pub backoff_step: Option<u32>,
    /// Quiet ticks before the firing bar resets to baseline
    pub quiet_reset_window: Option<u32>,
}

/// Notification channel toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Desktop notifications via the platform notification command
    pub desktop: bool,
    /// Plain-text alerts on stderr
    pub terminal: bool,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            desktop: true,
            terminal: true,
        }
    }
}

impl Config {
    /// Resolve the threshold policy for a resource, applying file overrides
    /// over the built-in defaults.
    pub fn policy_for(&self, resource: TrackedResource) -> ThresholdPolicy {
        let section = match resource {
            TrackedResource::Cpu => &self.cpu,
            TrackedResource::Ram => &self.ram,
            TrackedResource::Disc => &self.disc,
        };

        let mut policy = ThresholdPolicy::for_resource(resource);
        if let Some(threshold) = section.threshold {
            policy.primary_threshold = threshold;
        }
        if policy.secondary_threshold.is_some() {
            if let Some(swap) = section.swap_threshold {
                policy.secondary_threshold = Some(swap);
            }
        }
        if let Some(baseline) = section.baseline_fire_count {
            policy.baseline_fire_count = baseline;
        }
        if let Some(step) = section.backoff_step {
            policy.backoff_step = step;
        }
        if let Some(window) = section.quiet_reset_window {
            policy.quiet_reset_window = window;
        }
        policy
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.interval_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "general.interval_seconds".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        for resource in TrackedResource::ALL {
            let policy = self.policy_for(resource);
            if !(0.0..=1.0).contains(&policy.primary_threshold) {
                return Err(ConfigError::InvalidValue {
                    key: format!("{resource}.threshold"),
                    message: "must be a ratio in [0, 1]".to_string(),
                });
            }
            if let Some(secondary) = policy.secondary_threshold {
                if !(0.0..=1.0).contains(&secondary) {
                    return Err(ConfigError::InvalidValue {
                        key: format!("{resource}.swap_threshold"),
                        message: "must be a ratio in [0, 1]".to_string(),
                    });
                }
            }
            if policy.baseline_fire_count == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("{resource}.baseline_fire_count"),
                    message: "must be at least 1".to_string(),
                });
            }
        }

        Ok(())
    }
}
