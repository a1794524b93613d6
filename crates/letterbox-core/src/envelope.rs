//! Inbound wire envelope decoding
//!
//! Raw text frames received from the transport are decoded into typed
//! envelopes here. Anything that is not a well-formed letter envelope is
//! dropped before it can reach the delivery queue.

use serde::Deserialize;
use tracing::debug;

// ----------------------------------------------------------------------------
// Envelope
// ----------------------------------------------------------------------------

/// The only message discriminator accepted from the wire.
///
/// Matching is a case-sensitive exact comparison; `"Letter"` or
/// `"letter-v2"` are rejected.
pub const LETTER_MESSAGE_TYPE: &str = "letter";

/// A decoded inbound message.
///
/// Wire format is a JSON object with `type`, `data` and `user` fields:
/// `{"type": "letter", "data": "hello", "user": "alice"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Envelope {
    /// Message discriminator (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
    /// Opaque message payload
    pub data: String,
    /// Attributed sender name
    pub user: String,
}

// ----------------------------------------------------------------------------
// Decoding
// ----------------------------------------------------------------------------

/// Decode a raw text frame into an [`Envelope`].
///
/// Returns `None` for empty or whitespace-only input, for anything that
/// fails JSON parsing, and for envelopes whose discriminator is not
/// [`LETTER_MESSAGE_TYPE`]. Decode failures are logged and swallowed; they
/// never affect the connection.
pub fn decode(raw: &str) -> Option<Envelope> {
    if raw.trim().is_empty() {
        return None;
    }

    let envelope: Envelope = match serde_json::from_str(raw) {
        Ok(envelope) => envelope,
        Err(e) => {
            debug!("Dropping frame that failed envelope parsing: {}", e);
            return None;
        }
    };

    if envelope.kind != LETTER_MESSAGE_TYPE {
        debug!("Ignoring envelope with type: {}", envelope.kind);
        return None;
    }

    Some(envelope)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
