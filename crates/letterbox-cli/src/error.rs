//! Error handling for the Letterbox CLI

use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Listener error: {0}")]
    Listener(#[from] letterbox_ws::WsError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] letterbox_core::DeliveryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
