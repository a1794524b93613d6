//! Idempotent letter delivery
//!
//! The delivery guard wraps every mailbox write in a check-then-act pair:
//! a letter whose id is already present in the sink is skipped without a
//! second write, so replaying the same letter after a partial failure is
//! always safe.

use tracing::debug;

use crate::letter::Letter;
use crate::Result;

// ----------------------------------------------------------------------------
// Delivery Sink
// ----------------------------------------------------------------------------

/// Capability handle onto the host's delivered-items store.
///
/// `add` must both persist the letter and make a subsequent
/// `contains(id)` report true, otherwise the idempotency guarantee of
/// [`deliver`] does not hold.
pub trait DeliverySink {
    /// Whether a letter with this id has already landed in the store.
    fn contains(&self, id: &str) -> bool;

    /// Persist the letter body under the given id.
    fn add(&mut self, id: &str, body: &str) -> Result<()>;
}

// ----------------------------------------------------------------------------
// Idempotent Delivery Guard
// ----------------------------------------------------------------------------

/// Outcome of one guarded delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The letter was written to the sink.
    Applied,
    /// The sink already contained this letter; nothing was written.
    AlreadyDelivered,
}

/// Apply a letter to the sink unless it is already present.
///
/// An already-present letter is treated as delivered, not as an error.
pub fn deliver(letter: &Letter, sink: &mut dyn DeliverySink) -> Result<DeliveryOutcome> {
    if sink.contains(&letter.id) {
        debug!("Letter {} already delivered, skipping", letter.id);
        return Ok(DeliveryOutcome::AlreadyDelivered);
    }

    sink.add(&letter.id, &letter.body)?;
    Ok(DeliveryOutcome::Applied)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
