// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::{counter, Counter};

/// Process-wide count of aggregate calls that resolved via fallback.
///
/// Constructed once at startup and injected into the aggregation
/// service; there is no hidden static. The atomic mirror is what
/// `/health` and the tests read, the `metrics` handle feeds the
/// Prometheus registry. Monotonic: no decrement, no reset.
pub struct FallbackCounter {
    total: AtomicU64,
    exported: Counter,
}

impl FallbackCounter {
    pub fn new() -> Self {
        Self {
            total: AtomicU64::new(0),
            exported: counter!("aggregator_fallback_total"),
        }
    }

    /// Bump once for an aggregate call that resolved via fallback.
    /// Safe under concurrent calls from simultaneous requests.
    pub fn increment(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.exported.increment(1);
    }

    pub fn value(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}

impl Default for FallbackCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn counts_monotonically() {
        let counter = FallbackCounter::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.value(), 2);
    }

    #[tokio::test]
    async fn concurrent_increments_are_not_lost() {
        let counter = Arc::new(FallbackCounter::new());
        let mut handles = Vec::new();
        for _ in 0..16 {
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                counter.increment();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(counter.value(), 16);
    }
}
