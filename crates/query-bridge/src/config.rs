use crate::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CHANNEL_NAME: &str = "address_search_field";

const ENV_CHANNEL: &str = "ADDRESS_SEARCH_FIELD_CHANNEL";
const ENV_STRICT_ARGS: &str = "ADDRESS_SEARCH_FIELD_STRICT_ARGS";
const ENV_LOG: &str = "ADDRESS_SEARCH_FIELD_LOG";
const ENV_LOG_FILE: &str = "ADDRESS_SEARCH_FIELD_LOG_FILE";
const ENV_LOG_DIR: &str = "ADDRESS_SEARCH_FIELD_LOG_DIR";

/// Configuration for the bridge and the channel in front of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeConfig {
    pub channel_name: String,
    /// Reject arguments a query does not declare instead of ignoring them.
    pub strict_arguments: bool,
    pub log: LogConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            strict_arguments: false,
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `query_bridge=debug`.
    pub filter: String,
    /// Mirror log lines into a per-run file under this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            log_dir: None,
        }
    }
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(name) = lookup(ENV_CHANNEL) {
            config.channel_name = name.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_STRICT_ARGS) {
            config.strict_arguments = parse_flag(ENV_STRICT_ARGS, &raw)?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            config.log.filter = filter;
        }
        if let Some(raw) = lookup(ENV_LOG_FILE) {
            if parse_flag(ENV_LOG_FILE, &raw)? {
                config.log.log_dir = Some(default_log_dir()?);
            }
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|d| !d.trim().is_empty()) {
            config.log.log_dir = Some(PathBuf::from(dir));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_name.is_empty() {
            return Err(BridgeError::Config("channel name must not be empty".into()));
        }
        if self.log.filter.trim().is_empty() {
            return Err(BridgeError::Config("log filter must not be empty".into()));
        }
        Ok(())
    }
}

/// `<local data dir>/address_search_field/logs`
pub fn default_log_dir() -> Result<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("address_search_field").join("logs"))
        .ok_or_else(|| BridgeError::Config("Local data directory not found".into()))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(BridgeError::Config(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = BridgeConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.channel_name, "address_search_field");
        assert!(!config.strict_arguments);
        assert_eq!(config.log.filter, "info");
        assert!(config.log.log_dir.is_none());
    }

    #[test]
    fn environment_overrides() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            (ENV_CHANNEL, "platform_facts"),
            (ENV_STRICT_ARGS, "TRUE"),
            (ENV_LOG, "query_bridge=debug"),
            (ENV_LOG_DIR, "/tmp/bridge-logs"),
        ]))
        .unwrap();

        assert_eq!(config.channel_name, "platform_facts");
        assert!(config.strict_arguments);
        assert_eq!(config.log.filter, "query_bridge=debug");
        assert_eq!(config.log.log_dir, Some(PathBuf::from("/tmp/bridge-logs")));
    }

    #[test]
    fn log_file_flag_uses_default_dir() {
        let config = BridgeConfig::from_lookup(lookup_from(&[(ENV_LOG_FILE, "off")])).unwrap();
        assert!(config.log.log_dir.is_none());

        let enabled = BridgeConfig::from_lookup(lookup_from(&[(ENV_LOG_FILE, "1")]));
        match default_log_dir() {
            Ok(dir) => {
                assert!(dir.ends_with("address_search_field/logs"));
                assert_eq!(enabled.unwrap().log.log_dir, Some(dir));
            }
            Err(_) => assert!(matches!(enabled, Err(BridgeError::Config(_)))),
        }
    }

    #[test]
    fn explicit_log_dir_wins_over_flag() {
        let config = BridgeConfig::from_lookup(lookup_from(&[
            (ENV_LOG_FILE, "false"),
            (ENV_LOG_DIR, "/srv/bridge"),
        ]))
        .unwrap();
        assert_eq!(config.log.log_dir, Some(PathBuf::from("/srv/bridge")));

        let err = BridgeConfig::from_lookup(lookup_from(&[(ENV_LOG_FILE, "maybe")])).unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains(ENV_LOG_FILE)));
    }

    #[test]
    fn rejects_bad_flag() {
        let err = BridgeConfig::from_lookup(lookup_from(&[(ENV_STRICT_ARGS, "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, BridgeError::Config(msg) if msg.contains("sometimes")));
    }

    #[test]
    fn rejects_blank_channel_name() {
        let err = BridgeConfig::from_lookup(lookup_from(&[(ENV_CHANNEL, "   ")])).unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = BridgeConfig {
            strict_arguments: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BridgeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
