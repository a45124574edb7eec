//! Environment configuration.

use std::sync::Arc;

use crate::infrastructure::dice_service::DiceServiceClient;
use crate::infrastructure::local_dice::LocalDiceRoller;
use crate::infrastructure::ports::DiceRollerPort;

/// Default timeout for dice service requests.
pub const DEFAULT_DICE_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Base URL of the dice service; the local roller is used when unset.
    pub dice_service_url: Option<String>,
    pub dice_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dice_service_url: None,
            dice_timeout_secs: DEFAULT_DICE_TIMEOUT_SECS,
        }
    }
}

impl EngineConfig {
    /// Create config from environment variables.
    ///
    /// Uses `DICE_SERVICE_URL` and `DICE_TIMEOUT_SECS`, falling back to
    /// defaults if not set or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let dice_service_url = lookup("DICE_SERVICE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let dice_timeout_secs = lookup("DICE_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_DICE_TIMEOUT_SECS);

        Self {
            dice_service_url,
            dice_timeout_secs,
        }
    }

    /// Dice roller selected by this configuration.
    pub fn dice_roller(&self) -> Arc<dyn DiceRollerPort> {
        match &self.dice_service_url {
            Some(url) => {
                tracing::info!(url = %url, timeout_secs = self.dice_timeout_secs, "Using dice service");
                Arc::new(DiceServiceClient::with_timeout(url, self.dice_timeout_secs))
            }
            None => {
                tracing::info!("DICE_SERVICE_URL not set, rolling locally");
                Arc::new(LocalDiceRoller::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.dice_timeout_secs, 10);
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("DICE_SERVICE_URL", " http://dice.local "),
            ("DICE_TIMEOUT_SECS", "3"),
        ]));
        assert_eq!(config.dice_service_url.as_deref(), Some("http://dice.local"));
        assert_eq!(config.dice_timeout_secs, 3);
    }

    #[test]
    fn blank_url_and_bad_timeout_fall_back() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("DICE_SERVICE_URL", "  "),
            ("DICE_TIMEOUT_SECS", "soon"),
        ]));
        assert_eq!(config.dice_service_url, None);
        assert_eq!(config.dice_timeout_secs, DEFAULT_DICE_TIMEOUT_SECS);
    }
}
