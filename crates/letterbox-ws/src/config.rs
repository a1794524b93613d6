//! Listener configuration

use std::time::Duration;

// ----------------------------------------------------------------------------
// Listener Configuration
// ----------------------------------------------------------------------------

/// Configuration for the WebSocket listener
#[derive(Debug, Clone)]
pub struct WsListenerConfig {
    /// Endpoint URL (`ws://` or `wss://`)
    pub url: String,
    /// Delay between reconnect attempts. `None` means single-shot: one
    /// connection attempt and no retry.
    pub reconnect_interval: Option<Duration>,
    /// Maximum accepted message size in bytes. Frames are reassembled up
    /// to this bound; an oversize message fails the session instead of
    /// being truncated.
    pub max_message_size: usize,
    /// Pause inserted after each received frame, throttling the poll rate
    pub read_delay: Duration,
}

impl Default for WsListenerConfig {
    fn default() -> Self {
        Self {
            url: "ws://localhost:8080".to_string(),
            reconnect_interval: Some(Duration::from_secs(5)),
            max_message_size: 64 * 1024,
            read_delay: Duration::from_millis(100),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
