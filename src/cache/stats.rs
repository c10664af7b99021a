//! Cache statistics tracking.

/// Counters describing cache behavior since construction.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    /// Loads served from cache.
    pub hits: u64,
    /// Loads that found nothing usable.
    pub misses: u64,
    /// Successful writes.
    pub writes: u64,
    /// Writes that failed and were reported as "not cached".
    pub write_failures: u64,
    /// Corrupt records deleted during load or iteration.
    pub corrupt_evictions: u64,
    /// Explicit deletions requested by callers.
    pub deletes: u64,
}

impl CacheStats {
    /// Create a zeroed statistics tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hit rate over all loads (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Record a load served from cache.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Record a load that found nothing.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Record a successful write.
    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    /// Record a failed write.
    pub fn record_write_failure(&mut self) {
        self.write_failures += 1;
    }

    /// Record the deletion of a corrupt record.
    pub fn record_corrupt_eviction(&mut self) {
        self.corrupt_evictions += 1;
    }

    /// Record a caller-requested deletion.
    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zeroed() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.write_failures, 0);
        assert_eq!(stats.corrupt_evictions, 0);
        assert_eq!(stats.deletes, 0);
    }

    #[test]
    fn test_hit_rate_no_loads() {
        assert_eq!(CacheStats::new().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.hits = 3;
        stats.misses = 1;
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_record_methods_increment() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_write();
        stats.record_write_failure();
        stats.record_corrupt_eviction();
        stats.record_delete();

        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.write_failures, 1);
        assert_eq!(stats.corrupt_evictions, 1);
        assert_eq!(stats.deletes, 1);
    }
}
