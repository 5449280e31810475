//! Runtime configuration for automoc
//!
//! The command line only carries the paths handed over by the build system.
//! Everything else is read from the environment with defaults suited to a tool
//! that runs on every build pass.
//!
//! # Environment Variables
//!
//! - `VERBOSE`: any non-empty value enables verbose progress and command echo
//! - `COLOR`: forwarded as `--switch=<COLOR>` to the colored echo executable
//! - `AUTOMOC_LOG_LEVEL`: logging level - default: "warn"
//! - `AUTOMOC_LOG_JSON`: emit JSON log lines (true|false) - default: "false"
//! - `AUTOMOC_JOBS`: maximum concurrent generator processes - default: "4"
//! - `AUTOMOC_TOUCH_DELAY_MS`: delay before re-triggering the manifest, 1 to 10000 - default: "1000"

use crate::error::AutomocError;
use std::env;
use std::time::Duration;

const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_JOBS: usize = 4;
const MAX_JOBS: usize = 64;
const DEFAULT_TOUCH_DELAY_MS: u64 = 1000;
const MIN_TOUCH_DELAY_MS: u64 = 1;
const MAX_TOUCH_DELAY_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct AutomocConfig {
    pub verbose: bool,

    /// Value for the echo executable's `--switch=` argument
    pub color: String,

    pub log_level: String,

    pub log_json: bool,

    /// Concurrency cap for in-flight generator processes
    pub jobs: usize,

    /// Real-time delay before the manifest timestamp is moved forward
    pub touch_delay: Duration,
}

impl Default for AutomocConfig {
    /// Loads the configuration from the environment, falling back to defaults
    /// for anything missing or unparsable.
    fn default() -> Self {
        let verbose = env::var_os("VERBOSE").map_or(false, |v| !v.is_empty());

        let color = env::var("COLOR").unwrap_or_default();

        let log_level = env::var("AUTOMOC_LOG_LEVEL")
            .unwrap_or_else(|_| {
                if verbose {
                    "debug".to_string()
                } else {
                    DEFAULT_LOG_LEVEL.to_string()
                }
            })
            .to_lowercase();

        let log_json = env::var("AUTOMOC_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        let jobs = env::var("AUTOMOC_JOBS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_JOBS);

        let touch_delay_ms = env::var("AUTOMOC_TOUCH_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOUCH_DELAY_MS);

        Self {
            verbose,
            color,
            log_level,
            log_json,
            jobs,
            touch_delay: Duration::from_millis(touch_delay_ms),
        }
    }
}

impl AutomocConfig {
    /// Configuration with defaults only, ignoring the environment.
    pub fn defaults() -> Self {
        Self {
            verbose: false,
            color: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_json: false,
            jobs: DEFAULT_JOBS,
            touch_delay: Duration::from_millis(DEFAULT_TOUCH_DELAY_MS),
        }
    }

    pub fn validate(&self) -> Result<(), AutomocError> {
        if self.jobs == 0 || self.jobs > MAX_JOBS {
            return Err(AutomocError::InvalidConfig(format!(
                "AUTOMOC_JOBS must be between 1 and {}, got {}",
                MAX_JOBS, self.jobs
            )));
        }

        // The manifest must end up strictly newer than the output it triggers.
        let delay_range =
            Duration::from_millis(MIN_TOUCH_DELAY_MS)..=Duration::from_millis(MAX_TOUCH_DELAY_MS);
        if !delay_range.contains(&self.touch_delay) {
            return Err(AutomocError::InvalidConfig(format!(
                "AUTOMOC_TOUCH_DELAY_MS must be between {} and {}, got {}",
                MIN_TOUCH_DELAY_MS,
                MAX_TOUCH_DELAY_MS,
                self.touch_delay.as_millis()
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AutomocError::InvalidConfig(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}
