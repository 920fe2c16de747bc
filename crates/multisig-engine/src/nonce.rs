//! Strictly increasing nonces for L1 actions, tracked per leader key.

use alloy_primitives::Address;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Issues nonces of the form `max(now_ms, last + 1)`.
///
/// Calls for the same leader are serialized by the map's entry lock, so
/// concurrent callers never observe the same value. Different leaders do
/// not contend.
pub struct NonceManager {
    last: DashMap<Address, u64>,
    clock: Clock,
}

impl NonceManager {
    /// Nonce manager driven by the wall clock.
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Nonce manager driven by a caller-supplied millisecond clock.
    pub fn with_clock(clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self {
            last: DashMap::new(),
            clock: Arc::new(clock),
        }
    }

    pub fn next_nonce(&self, leader: Address) -> u64 {
        let now = (self.clock)();
        let mut last = self.last.entry(leader).or_insert(0);
        let next = now.max(last.saturating_add(1));
        *last = next;
        next
    }

    /// Raise the floor to a nonce seen elsewhere, e.g. one the venue
    /// reported after a restart. Never lowers it.
    pub fn observe(&self, leader: Address, nonce: u64) {
        let mut last = self.last.entry(leader).or_insert(nonce);
        if nonce > *last {
            debug!(leader = %leader, nonce, "Raised nonce floor");
            *last = nonce;
        }
    }

    /// Last nonce issued or observed for `leader`.
    pub fn last(&self, leader: Address) -> Option<u64> {
        self.last.get(&leader).map(|entry| *entry)
    }
}

impl Default for NonceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NonceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceManager")
            .field("leaders", &self.last.len())
            .finish()
    }
}
