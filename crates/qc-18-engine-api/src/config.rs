//! # Engine API Configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Environment variable holding the verdict timeout in milliseconds.
pub const VERDICT_TIMEOUT_ENV: &str = "QC_ENGINE_VERDICT_TIMEOUT_MS";

/// Engine API service configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineApiConfig {
    /// How long a round leader waits for the pipeline's verdict before
    /// answering `SYNCING`. `None` waits indefinitely.
    #[serde(default)]
    pub verdict_timeout_ms: Option<u64>,
}

impl EngineApiConfig {
    /// Short timeout so stalled tests fail fast.
    pub fn for_testing() -> Self {
        Self {
            verdict_timeout_ms: Some(2_000),
        }
    }

    /// Load from the environment. Unset, empty or unparsable values leave
    /// the wait unbounded.
    pub fn from_env() -> Self {
        Self {
            verdict_timeout_ms: env::var(VERDICT_TIMEOUT_ENV)
                .ok()
                .and_then(|v| v.trim().parse().ok()),
        }
    }

    pub fn with_verdict_timeout(mut self, timeout: Duration) -> Self {
        self.verdict_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn verdict_timeout(&self) -> Option<Duration> {
        self.verdict_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_waits_forever() {
        assert_eq!(EngineApiConfig::default().verdict_timeout(), None);
    }

    #[test]
    fn test_testing_config_is_bounded() {
        let config = EngineApiConfig::for_testing();
        assert_eq!(config.verdict_timeout(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn test_with_verdict_timeout() {
        let config = EngineApiConfig::default().with_verdict_timeout(Duration::from_millis(50));
        assert_eq!(config.verdict_timeout_ms, Some(50));
    }

    #[test]
    fn test_missing_field_deserializes_to_default() {
        let config: EngineApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineApiConfig::default());
    }
}
