use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Display loop settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Longest time a poll may block while no redraw is pending.
    pub idle_wait_ms: u64,
    /// Apply built-in handling (quit on close, redraw on view changes) to
    /// events no handler claimed.
    pub default_processing: bool,
}

impl DispatchConfig {
    #[must_use]
    pub fn idle_wait(&self) -> Duration {
        Duration::from_millis(self.idle_wait_ms)
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            idle_wait_ms: 16,
            default_processing: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DispatchConfig = serde_json::from_str(r#"{ "idle_wait_ms": 100 }"#).unwrap();
        assert_eq!(config.idle_wait(), Duration::from_millis(100));
        assert!(config.default_processing);
    }
}
