//! Explicit `{value, timestamp}` cache with a caller-supplied TTL

use std::time::{Duration, Instant};

use parking_lot::RwLock;

struct Entry<T> {
    value: T,
    stored_at: Instant,
}

/// One cached value with an explicit freshness check.
///
/// The TTL is passed at read time so callers decide staleness policy, and
/// `force_refresh` paths simply bypass [`TtlCache::get`].
pub struct TtlCache<T> {
    entry: RwLock<Option<Entry<T>>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new() -> Self {
        Self {
            entry: RwLock::new(None),
        }
    }

    /// The cached value if it is younger than `ttl`.
    pub fn get(&self, ttl: Duration) -> Option<T> {
        let guard = self.entry.read();
        let entry = guard.as_ref()?;
        if entry.stored_at.elapsed() < ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn put(&self, value: T) {
        *self.entry.write() = Some(Entry {
            value,
            stored_at: Instant::now(),
        });
    }

    pub fn invalidate(&self) {
        *self.entry.write() = None;
    }
}

impl<T: Clone> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
