//! Letter construction
//!
//! A [`Letter`] is the unit of pending delivery: a freshly generated unique
//! id plus the fully formatted message body. The body format is part of the
//! observable contract with existing mailbox consumers.

use uuid::Uuid;

use crate::envelope::Envelope;

/// Separator between the message payload and the attribution line.
pub const BODY_SEPARATOR: &str = "^^";

/// Attribution phrase prefixed to the sender name.
pub const ATTRIBUTION: &str = "Love, ";

// ----------------------------------------------------------------------------
// Letter
// ----------------------------------------------------------------------------

/// A pending delivery event produced from one accepted envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    /// Generated unique identifier, stable for the lifetime of this letter
    pub id: String,
    /// Formatted message body: `{data}^^Love, {user}`
    pub body: String,
}

impl Letter {
    /// Build a letter from a decoded envelope.
    ///
    /// Each call generates a fresh id, so two letters built from identical
    /// envelopes are distinct deliveries.
    pub fn from_envelope(envelope: &Envelope) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            body: format!(
                "{}{}{}{}",
                envelope.data, BODY_SEPARATOR, ATTRIBUTION, envelope.user
            ),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
