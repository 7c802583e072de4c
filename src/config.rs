//! Operator-facing settings for the tracking service.
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const DEFAULT_UPLOAD_INTERVAL_MS: u64 = 15_000;
pub const DEFAULT_DEVICE_NAME: &str = "Android Device";
pub const DEFAULT_LOCATION_PROVIDER: &str = "gps";

// Keys accepted by `TrackerConfig::apply_setting`.
pub const UPLOAD_URL_KEY: &str = "upload_url";
pub const UPLOAD_INTERVAL_KEY: &str = "upload_interval";
pub const DEVICE_NAME_KEY: &str = "device_name";
pub const LOCATION_PROVIDER_KEY: &str = "location_provider";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Endpoint receiving the `coords=` POSTs. Uploads fail while this is unset.
    pub upload_url: Option<String>,
    #[serde(rename = "upload_interval_ms", with = "millis")]
    pub upload_interval: Duration,
    pub device_name: String,
    pub location_provider: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            upload_url: None,
            upload_interval: Duration::from_millis(DEFAULT_UPLOAD_INTERVAL_MS),
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            location_provider: DEFAULT_LOCATION_PROVIDER.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Loads a config from a JSON file. Missing keys fall back to their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.upload_interval.is_zero() {
            return Err(ConfigError::InvalidSetting {
                key: UPLOAD_INTERVAL_KEY.to_string(),
                value: "0".to_string(),
            });
        }
        Ok(config)
    }

    /// Applies a single `key = value` settings change.
    ///
    /// The upload interval is given in milliseconds and must consist of ASCII
    /// digits only and be greater than zero.
    pub fn apply_setting(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            UPLOAD_URL_KEY => self.upload_url = Some(value.to_string()),
            UPLOAD_INTERVAL_KEY => self.upload_interval = parse_interval(value)?,
            DEVICE_NAME_KEY => self.device_name = value.to_string(),
            LOCATION_PROVIDER_KEY => self.location_provider = value.to_string(),
            _ => return Err(ConfigError::UnknownSetting(key.to_string())),
        }
        info!("Updated setting {key} to {value}");
        Ok(())
    }
}

fn parse_interval(value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidSetting {
        key: UPLOAD_INTERVAL_KEY.to_string(),
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match value.parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(invalid()),
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.upload_url, None);
        assert_eq!(config.upload_interval, Duration::from_millis(15_000));
        assert_eq!(config.device_name, "Android Device");
        assert_eq!(config.location_provider, "gps");
    }

    #[test]
    fn test_from_json_fills_missing_fields_with_defaults() {
        let config = TrackerConfig::from_json(
            r#"{"upload_url": "http://example.com/track", "upload_interval_ms": 5000}"#,
        )
        .unwrap();

        assert_eq!(config.upload_url.as_deref(), Some("http://example.com/track"));
        assert_eq!(config.upload_interval, Duration::from_secs(5));
        assert_eq!(config.device_name, DEFAULT_DEVICE_NAME);
    }

    #[test]
    fn test_from_json_rejects_zero_interval() {
        let result = TrackerConfig::from_json(r#"{"upload_interval_ms": 0}"#);
        assert!(matches!(result, Err(ConfigError::InvalidSetting { .. })));
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        let result = TrackerConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_apply_setting_updates_fields() {
        let mut config = TrackerConfig::default();
        config.apply_setting("upload_url", "http://host/up").unwrap();
        config.apply_setting("upload_interval", "60000").unwrap();
        config.apply_setting("device_name", "Bike").unwrap();
        config.apply_setting("location_provider", "network").unwrap();

        assert_eq!(config.upload_url.as_deref(), Some("http://host/up"));
        assert_eq!(config.upload_interval, Duration::from_secs(60));
        assert_eq!(config.device_name, "Bike");
        assert_eq!(config.location_provider, "network");
    }

    #[test]
    fn test_apply_setting_rejects_non_numeric_interval() {
        let mut config = TrackerConfig::default();
        for value in ["", "15s", "-5", "1.5", "0"] {
            let result = config.apply_setting("upload_interval", value);
            assert!(
                matches!(result, Err(ConfigError::InvalidSetting { .. })),
                "{value:?} should be rejected"
            );
        }
        assert_eq!(config.upload_interval, Duration::from_millis(15_000));
    }

    #[test]
    fn test_apply_setting_rejects_unknown_key() {
        let mut config = TrackerConfig::default();
        let result = config.apply_setting("theme", "dark");
        assert!(matches!(result, Err(ConfigError::UnknownSetting(key)) if key == "theme"));
    }
}
