//! Letterbox core logic
//!
//! This crate provides the transport-independent pieces of Letterbox: decoding
//! inbound wire envelopes into letters, buffering letters while the consuming
//! host is not ready to accept them, and applying each letter to the host's
//! mailbox exactly once.

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod delivery;
pub mod envelope;
pub mod letter;
pub mod queue;

// ----------------------------------------------------------------------------
// Public API
// ----------------------------------------------------------------------------

pub use delivery::{deliver, DeliveryOutcome, DeliverySink};
pub use envelope::{decode, Envelope, LETTER_MESSAGE_TYPE};
pub use letter::Letter;
pub use queue::DeliveryQueue;

// ----------------------------------------------------------------------------
// Error Types
// ----------------------------------------------------------------------------

/// Core error types for Letterbox delivery
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Mailbox sink rejected letter {letter_id}: {reason}")]
    SinkRejected { letter_id: String, reason: String },
}

pub type Result<T> = core::result::Result<T, DeliveryError>;
