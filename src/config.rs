//! Run configuration for the prober.
//!
//! A validated [`MonitorConfig`] is the only input the scheduler needs;
//! the CLI builds one from flags, but any caller can construct (or
//! deserialize) an equivalent configuration directly.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::probe::Mode;

/// Default probe timeout (3 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Default delay between cycles (1 second).
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_delay() -> Duration {
    DEFAULT_DELAY
}

/// Configuration error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Target list is empty after trimming blank entries.
    #[error("no targets specified")]
    NoTargets,

    /// Probe timeout must be strictly positive.
    #[error("timeout must be positive")]
    InvalidTimeout,
}

/// Configuration for one monitoring run.
///
/// The mode selects the probe strategy for every target in the run; there
/// is no per-target mode mixing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Probe strategy for the whole run.
    pub mode: Mode,
    /// Raw target strings, probed in this order every cycle.
    pub targets: Vec<String>,
    /// Timeout applied to every probe call (default: 3s).
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
    /// Delay between the end of one cycle and the start of the next
    /// (default: 1s).
    #[serde(default = "default_delay", with = "humantime_serde")]
    pub delay: Duration,
}

impl MonitorConfig {
    /// Create a configuration with default timeout and delay.
    pub fn new(mode: Mode, targets: Vec<String>) -> Self {
        Self {
            mode,
            targets,
            timeout: DEFAULT_TIMEOUT,
            delay: DEFAULT_DELAY,
        }
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the inter-cycle delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoTargets`] if no non-blank target remains,
    /// [`ConfigError::InvalidTimeout`] if the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.iter().all(|t| t.trim().is_empty()) {
            return Err(ConfigError::NoTargets);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Split a comma-separated target list, trimming whitespace and dropping
/// blank entries.
pub fn split_target_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
