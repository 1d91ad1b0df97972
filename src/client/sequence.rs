//! Monotonic request tokens
//!
//! The periodic poll and user-triggered refreshes are not causally ordered;
//! without sequencing, the last response to resolve would win even when it
//! answers an older request. Each controller owns a [`RequestSequence`] and
//! drops any response whose token is no longer the newest issued.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonically increasing request counter for one controller
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    /// Create a new sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a request that is about to start
    pub fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a completed request is still the latest issued
    pub fn is_current(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}
