//! In-process dedup ledger of forwarded order ids.
//!
//! The ledger lives as long as the process and is never persisted; a restart
//! forgets everything and previously forwarded orders may be sent again.
//!
//! Overlapping requests can see the same order. To keep two of them from
//! both forwarding it, an id is first [`claim`](DedupLedger::claim)ed, which
//! succeeds only if the id is neither forwarded nor already claimed. The
//! returned [`Claim`] is either [`mark`](Claim::mark)ed (forward succeeded)
//! or dropped, which releases the id for the next poll. Dropping covers a
//! pass that is cancelled mid-forward, e.g. by a request timeout.
//!
//! The lock is synchronous and never held across an await.

use std::collections::HashSet;

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct LedgerState {
    forwarded: HashSet<String>,
    in_flight: HashSet<String>,
}

/// Thread-safe set of forwarded order ids.
///
/// Designed to be wrapped in `Arc` and shared across request handlers.
#[derive(Debug, Default)]
pub struct DedupLedger {
    state: Mutex<LedgerState>,
}

impl DedupLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the order has been forwarded successfully.
    pub fn has(&self, order_id: &str) -> bool {
        self.state.lock().forwarded.contains(order_id)
    }

    /// Atomic has-and-reserve: claim an order for forwarding.
    ///
    /// Returns `None` if it was already forwarded or another caller holds
    /// the claim. The claim is released when the guard drops unmarked.
    pub fn claim(&self, order_id: &str) -> Option<Claim<'_>> {
        let mut state = self.state.lock();
        if state.forwarded.contains(order_id) || !state.in_flight.insert(order_id.to_string()) {
            return None;
        }
        Some(Claim {
            ledger: self,
            order_id: order_id.to_string(),
            marked: false,
        })
    }

    /// Drop a claim without recording the order as forwarded.
    pub fn release(&self, order_id: &str) {
        self.state.lock().in_flight.remove(order_id);
    }

    /// Record the order as forwarded, consuming any claim on it.
    pub fn mark(&self, order_id: &str) {
        let mut state = self.state.lock();
        state.in_flight.remove(order_id);
        state.forwarded.insert(order_id.to_string());
    }

    /// Forget every forwarded order. Returns how many were cleared.
    ///
    /// Claims in flight are left to their guards.
    pub fn reset(&self) -> usize {
        let mut state = self.state.lock();
        let cleared = state.forwarded.len();
        state.forwarded.clear();
        cleared
    }

    /// Number of forwarded orders.
    pub fn len(&self) -> usize {
        self.state.lock().forwarded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of orders currently claimed and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.state.lock().in_flight.len()
    }
}

/// Exclusive right to forward one order.
///
/// Releases the order on drop unless [`mark`](Claim::mark)ed.
#[derive(Debug)]
#[must_use = "dropping a claim releases the order immediately"]
pub struct Claim<'a> {
    ledger: &'a DedupLedger,
    order_id: String,
    marked: bool,
}

impl Claim<'_> {
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Record the order as forwarded.
    pub fn mark(mut self) {
        self.ledger.mark(&self.order_id);
        self.marked = true;
    }
}

impl Drop for Claim<'_> {
    fn drop(&mut self) {
        if !self.marked {
            self.ledger.release(&self.order_id);
        }
    }
}
