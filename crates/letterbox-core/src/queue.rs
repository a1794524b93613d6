//! Deferred delivery queue
//!
//! Letters decoded while the host is not ready to accept mail accumulate
//! here. The queue is FIFO and unbounded: never dropping a letter is
//! preferred over bounding memory while the host stays not-ready. The
//! transport task enqueues and the host's lifecycle callbacks flush, so
//! the underlying storage is mutex-guarded.

use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::{debug, info};

use crate::delivery::{deliver, DeliverySink};
use crate::letter::Letter;
use crate::Result;

// ----------------------------------------------------------------------------
// Delivery Queue
// ----------------------------------------------------------------------------

/// Ordered buffer of letters awaiting a ready host.
#[derive(Debug, Default)]
pub struct DeliveryQueue {
    pending: Mutex<VecDeque<Letter>>,
}

impl DeliveryQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a letter at the tail. Never blocks, never fails.
    pub fn enqueue(&self, letter: Letter) {
        debug!("Queueing letter {}", letter.id);
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.push_back(letter);
    }

    /// Number of letters currently pending.
    pub fn len(&self) -> usize {
        let pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.len()
    }

    /// Whether no letters are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain pending letters into the sink if the host is ready.
    ///
    /// Not ready is a pure no-op returning `Ok(0)`. Otherwise letters are
    /// applied strictly in enqueue order through the idempotent delivery
    /// guard and the number of letters drained is returned. A sink failure
    /// puts the letter back at the head and aborts the flush with the
    /// error, so the next flush retries it rather than dropping it.
    pub fn flush_if_ready(&self, ready: bool, sink: &mut dyn DeliverySink) -> Result<usize> {
        if !ready {
            return Ok(0);
        }

        let mut drained = 0;
        loop {
            let letter = {
                let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
                match pending.pop_front() {
                    Some(letter) => letter,
                    None => break,
                }
            };

            // The lock is not held across the sink call.
            if let Err(e) = deliver(&letter, sink) {
                let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
                pending.push_front(letter);
                return Err(e);
            }
            drained += 1;
        }

        if drained > 0 {
            info!("Flushed {} queued letter(s)", drained);
        }
        Ok(drained)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DeliveryError;
    use std::collections::HashSet;

    /// Fake sink recording apply order.
    #[derive(Default)]
    struct OrderSink {
        delivered_ids: HashSet<String>,
        order: Vec<String>,
        fail_on: Option<String>,
    }

    impl DeliverySink for OrderSink {
        fn contains(&self, id: &str) -> bool {
            self.delivered_ids.contains(id)
        }

        fn add(&mut self, id: &str, body: &str) -> Result<()> {
            if self.fail_on.as_deref() == Some(id) {
                return Err(DeliveryError::SinkRejected {
                    letter_id: id.to_string(),
                    reason: "injected failure".to_string(),
                });
            }
            self.delivered_ids.insert(id.to_string());
            self.order.push(body.to_string());
            Ok(())
        }
    }

    fn letter(id: &str) -> Letter {
        Letter {
            id: id.to_string(),
            body: format!("body-{}", id),
        }
    }

    #[test]
    fn test_flush_applies_in_enqueue_order() {
        let queue = DeliveryQueue::new();
        queue.enqueue(letter("a"));
        queue.enqueue(letter("b"));
        queue.enqueue(letter("c"));

        let mut sink = OrderSink::default();
        let drained = queue.flush_if_ready(true, &mut sink).unwrap();

        assert_eq!(drained, 3);
        assert_eq!(sink.order, vec!["body-a", "body-b", "body-c"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_flush_not_ready_is_noop() {
        let queue = DeliveryQueue::new();
        for i in 0..4 {
            queue.enqueue(letter(&format!("l{}", i)));
        }

        let mut sink = OrderSink::default();
        for _ in 0..3 {
            assert_eq!(queue.flush_if_ready(false, &mut sink).unwrap(), 0);
        }
        assert_eq!(queue.len(), 4);
        assert!(sink.order.is_empty());

        // A later ready flush still applies everything in order
        let drained = queue.flush_if_ready(true, &mut sink).unwrap();
        assert_eq!(drained, 4);
        assert_eq!(sink.order, vec!["body-l0", "body-l1", "body-l2", "body-l3"]);
    }

    #[test]
    fn test_flush_empty_queue() {
        let queue = DeliveryQueue::new();
        let mut sink = OrderSink::default();
        assert_eq!(queue.flush_if_ready(true, &mut sink).unwrap(), 0);
    }

    #[test]
    fn test_already_delivered_letters_are_skipped() {
        let queue = DeliveryQueue::new();
        queue.enqueue(letter("dup"));
        queue.enqueue(letter("new"));

        let mut sink = OrderSink::default();
        sink.delivered_ids.insert("dup".to_string());

        let drained = queue.flush_if_ready(true, &mut sink).unwrap();
        assert_eq!(drained, 2);
        // Only the new letter actually hit the store
        assert_eq!(sink.order, vec!["body-new"]);
    }

    #[test]
    fn test_failed_apply_retries_at_head() {
        let queue = DeliveryQueue::new();
        queue.enqueue(letter("ok"));
        queue.enqueue(letter("bad"));
        queue.enqueue(letter("later"));

        let mut sink = OrderSink {
            fail_on: Some("bad".to_string()),
            ..Default::default()
        };

        // First flush aborts at the failing letter, leaving it at the head
        assert!(queue.flush_if_ready(true, &mut sink).is_err());
        assert_eq!(queue.len(), 2);
        assert_eq!(sink.order, vec!["body-ok"]);

        // Once the sink recovers, the retried flush drains the rest in order
        sink.fail_on = None;
        let drained = queue.flush_if_ready(true, &mut sink).unwrap();
        assert_eq!(drained, 2);
        assert_eq!(sink.order, vec!["body-ok", "body-bad", "body-later"]);
    }
}
