//! Letterbox CLI configuration
//!
//! Configuration is loaded from a TOML file (`letterbox.toml`) with CLI
//! arguments taking precedence, falling back to defaults for everything
//! except the endpoint host, which has no sensible default and is a fatal
//! error when absent.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use letterbox_ws::WsListenerConfig;

use crate::error::{CliError, Result};

// ----------------------------------------------------------------------------
// Application Configuration
// ----------------------------------------------------------------------------

/// Complete configuration for the Letterbox daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// WebSocket endpoint configuration
    pub websocket: WebsocketSettings,

    /// Seconds between periodic flush attempts (checkpoint boundary)
    pub flush_interval_secs: u64,
}

/// WebSocket endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsocketSettings {
    /// Endpoint URL (`ws://` or `wss://`). Required.
    pub host: Option<String>,

    /// Seconds between reconnect attempts; omit for single-shot mode
    pub reconnect_secs: Option<u64>,

    /// Maximum accepted message size in bytes
    pub max_message_size: usize,

    /// Milliseconds to pause after each received frame
    pub read_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            websocket: WebsocketSettings::default(),
            flush_interval_secs: 10,
        }
    }
}

impl Default for WebsocketSettings {
    fn default() -> Self {
        Self {
            host: None,
            reconnect_secs: Some(5),
            max_message_size: 64 * 1024,
            read_delay_ms: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Build the listener configuration, validating that a host is set.
    pub fn listener_config(&self) -> Result<WsListenerConfig> {
        let host = match &self.websocket.host {
            Some(host) if !host.trim().is_empty() => host.clone(),
            _ => {
                return Err(CliError::Config(
                    "Invalid configuration. Missing websocket.host property.".to_string(),
                ))
            }
        };

        Ok(WsListenerConfig {
            url: host,
            reconnect_interval: self.websocket.reconnect_secs.map(Duration::from_secs),
            max_message_size: self.websocket.max_message_size,
            read_delay: Duration::from_millis(self.websocket.read_delay_ms),
        })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_host_is_fatal() {
        let config = AppConfig::default();
        assert!(matches!(
            config.listener_config(),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_blank_host_is_fatal() {
        let mut config = AppConfig::default();
        config.websocket.host = Some("   ".to_string());
        assert!(config.listener_config().is_err());
    }

    #[test]
    fn test_listener_config_from_settings() {
        let mut config = AppConfig::default();
        config.websocket.host = Some("ws://mail.example.com:9000".to_string());
        config.websocket.reconnect_secs = Some(3);

        let listener = config.listener_config().unwrap();
        assert_eq!(listener.url, "ws://mail.example.com:9000");
        assert_eq!(listener.reconnect_interval, Some(Duration::from_secs(3)));
        assert_eq!(listener.read_delay, Duration::from_millis(100));
    }

    #[test]
    fn test_parse_toml() {
        let raw = r#"
            flush_interval_secs = 30

            [websocket]
            host = "wss://mail.example.com"
            reconnect_secs = 5
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.flush_interval_secs, 30);
        assert_eq!(config.websocket.host.as_deref(), Some("wss://mail.example.com"));
        // Unspecified fields keep their defaults
        assert_eq!(config.websocket.max_message_size, 64 * 1024);
    }
}
