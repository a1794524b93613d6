//! Resilient WebSocket listener for Letterbox
//!
//! This crate maintains one long-lived WebSocket connection to a remote
//! endpoint, reconnecting at a fixed interval when the connection fails,
//! and hands every received text frame to the consumer through an
//! unbounded channel. All transport failures feed the reconnect cycle;
//! none of them reach the caller.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod config;
pub mod listener;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use config::WsListenerConfig;
pub use listener::WsListener;

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Errors raised when constructing a listener.
///
/// These are the only caller-visible failures; everything that happens
/// after `connect_and_listen` is swallowed into the reconnect loop.
#[derive(Debug, thiserror::Error)]
pub enum WsError {
    #[error("Invalid listener configuration: {0}")]
    Configuration(String),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = core::result::Result<T, WsError>;
