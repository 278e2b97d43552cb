//! Application settings
//!
//! Everything is optional in the JSON file; missing sections and fields take
//! their defaults, which drive the built-in arm with the oscillating vertical
//! command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use control::ControlConfig;
use dispatch::DispatchConfig;

/// Passed untouched to every display callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Log the end-effector pose every this many control steps; 0 disables.
    pub log_every: u64,
    /// Clock step for headless runs, in milliseconds.
    pub headless_step_ms: u64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            log_every: 50,
            headless_step_ms: 10,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub control: ControlConfig,
    pub dispatch: DispatchConfig,
    pub display: DisplayOptions,
    #[cfg(feature = "window")]
    pub window: window::WindowConfig,
}

impl AppConfig {
    /// Read settings from `path`, or use the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid JSON
    /// for this structure.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    /// # Errors
    ///
    /// Returns an error when `text` is not valid JSON for this structure.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse configuration")
    }
}
