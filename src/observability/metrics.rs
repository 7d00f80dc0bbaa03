//! Metrics registry for forumd
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start
//! - Thread-safe but lock-minimal

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for the post service
///
/// All counters use Relaxed ordering; readers only need eventual values.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Batches committed by the bulk creation engine
    batches_committed: AtomicU64,
    /// Batches rejected during validation
    batches_rejected: AtomicU64,
    /// Posts created across all batches
    posts_created: AtomicU64,
    /// Messages actually changed
    posts_updated: AtomicU64,
    /// Single-post lookups served
    posts_read: AtomicU64,
    /// Thread listings served
    listings_served: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a committed batch of `size` posts
    pub fn record_batch(&self, size: u64) {
        self.batches_committed.fetch_add(1, Ordering::Relaxed);
        self.posts_created.fetch_add(size, Ordering::Relaxed);
    }

    pub fn increment_batches_rejected(&self) {
        self.batches_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_posts_updated(&self) {
        self.posts_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_posts_read(&self) {
        self.posts_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_listings(&self) {
        self.listings_served.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_committed: self.batches_committed.load(Ordering::Relaxed),
            batches_rejected: self.batches_rejected.load(Ordering::Relaxed),
            posts_created: self.posts_created.load(Ordering::Relaxed),
            posts_updated: self.posts_updated.load(Ordering::Relaxed),
            posts_read: self.posts_read.load(Ordering::Relaxed),
            listings_served: self.listings_served.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub batches_committed: u64,
    pub batches_rejected: u64,
    pub posts_created: u64,
    pub posts_updated: u64,
    pub posts_read: u64,
    pub listings_served: u64,
}
