//! Letterbox CLI library
//!
//! Exposes the daemon's building blocks so integration tests can wire the
//! listener, queue and mailbox together the same way the binary does.

pub mod config;
pub mod error;
pub mod mailbox;

pub use config::AppConfig;
pub use error::{CliError, Result};
pub use mailbox::MemoryMailbox;
