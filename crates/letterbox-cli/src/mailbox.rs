//! In-memory mailbox sink
//!
//! Stands in for the host application's persistent mailbox store. The
//! delivered-id set is what makes replayed deliveries idempotent.

use std::collections::HashSet;

use tracing::info;

use letterbox_core::{DeliverySink, Result};

/// In-memory delivered-items store
#[derive(Debug, Default)]
pub struct MemoryMailbox {
    delivered_ids: HashSet<String>,
    letters: Vec<(String, String)>,
}

impl MemoryMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// All delivered letters as `(id, body)` pairs, in delivery order.
    pub fn letters(&self) -> &[(String, String)] {
        &self.letters
    }
}

impl DeliverySink for MemoryMailbox {
    fn contains(&self, id: &str) -> bool {
        self.delivered_ids.contains(id)
    }

    fn add(&mut self, id: &str, body: &str) -> Result<()> {
        info!("Letter mailed: {}", body);
        self.delivered_ids.insert(id.to_string());
        self.letters.push((id.to_string(), body.to_string()));
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
