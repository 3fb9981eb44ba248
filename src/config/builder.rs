//! Configuration builder
//!
//! Merges configuration from files and CLI arguments. CLI flags win over the
//! file, which wins over the built-in defaults.

use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file.
    ///
    /// An explicit path must exist; without one the default locations are
    /// probed and silently skipped when absent.
    pub fn with_file(mut self, path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            self.config = ConfigFile::load(path)?;
        } else if let Some(config) = ConfigFile::load_default() {
            self.config = config;
        }
        Ok(self)
    }

    /// Override with CLI verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        if verbose {
            self.config.general.verbose = true;
        }
        self
    }

    /// Override with CLI interval
    pub fn with_interval(mut self, interval: Option<u64>) -> Self {
        if let Some(i) = interval {
            self.config.general.interval_seconds = i;
        }
        self
    }

    /// Validate and produce the final configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
