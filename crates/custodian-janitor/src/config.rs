//! Configuration for sweep operations
//!
//! Defines the sweep interval and the expiration horizon, with hard lower
//! bounds enforced before any loop starts.

use crate::JanitorError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Smallest interval the worker accepts between sweeps.
pub const MIN_RUN_EVERY: Duration = Duration::from_secs(60);

/// Smallest expiration horizon a deployment may configure.
pub const MIN_EXPIRE_AFTER: Duration = Duration::from_secs(60);

/// Upper bound on one discovery query, independent of the interval.
///
/// Strictly shorter than any valid interval, so a stuck backend cannot
/// starve future ticks.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the sweep worker
///
/// # Examples
///
/// ```
/// use custodian_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.run_every_minutes, 60);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// How often to run the sweep cycle (in minutes)
    /// Default: every 60 minutes (hourly)
    #[serde(default = "default_run_every_minutes")]
    pub run_every_minutes: u64,

    /// Age at which a resource becomes eligible for cleanup (in hours)
    /// Default: 24 hours
    #[serde(default = "default_expire_after_hours")]
    pub expire_after_hours: u64,
}

fn default_run_every_minutes() -> u64 {
    60
}

fn default_expire_after_hours() -> u64 {
    24
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            run_every_minutes: default_run_every_minutes(),
            expire_after_hours: default_expire_after_hours(),
        }
    }
}

impl JanitorConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, JanitorError> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Get the sweep interval as a Duration
    pub fn run_every(&self) -> Duration {
        Duration::from_secs(self.run_every_minutes * 60)
    }

    /// Get the expiration horizon as a Duration
    pub fn expire_after(&self) -> Duration {
        Duration::from_secs(self.expire_after_hours * 3600)
    }

    /// Check the hard lower bounds. Called before the loop starts; a bad
    /// value is fatal, never retried.
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.run_every() < MIN_RUN_EVERY {
            return Err(JanitorError::Config(format!(
                "wrong run every duration {:?}, expected >= {:?}",
                self.run_every(),
                MIN_RUN_EVERY
            )));
        }
        if self.expire_after() < MIN_EXPIRE_AFTER {
            return Err(JanitorError::Config(format!(
                "wrong expire duration {:?}, expected >= {:?}",
                self.expire_after(),
                MIN_EXPIRE_AFTER
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.run_every_minutes, 60);
        assert_eq!(config.expire_after_hours, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duration_conversions() {
        let config = JanitorConfig::default();
        assert_eq!(config.run_every(), Duration::from_secs(60 * 60));
        assert_eq!(config.expire_after(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn test_validate_rejects_small_interval() {
        let config = JanitorConfig {
            run_every_minutes: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_small_horizon() {
        let config = JanitorConfig {
            expire_after_hours: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_minimum_interval() {
        let config = JanitorConfig {
            run_every_minutes: 1,
            expire_after_hours: 1,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_discovery_timeout_fits_minimum_interval() {
        assert!(DISCOVERY_TIMEOUT <= MIN_RUN_EVERY);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = JanitorConfig {
            run_every_minutes: 30,
            expire_after_hours: 48,
        };
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: JanitorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config.run_every_minutes, deserialized.run_every_minutes);
        assert_eq!(config.expire_after_hours, deserialized.expire_after_hours);
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "run_every_minutes = 15").unwrap();
        writeln!(file, "expire_after_hours = 72").unwrap();

        let config = JanitorConfig::load(file.path()).unwrap();
        assert_eq!(config.run_every_minutes, 15);
        assert_eq!(config.expire_after_hours, 72);
    }

    #[test]
    fn test_load_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "run_every_minutes = 15").unwrap();

        let config = JanitorConfig::load(file.path()).unwrap();
        assert_eq!(config.expire_after_hours, 24);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(JanitorConfig::load("/nonexistent/custodian.toml").is_err());
    }
}
