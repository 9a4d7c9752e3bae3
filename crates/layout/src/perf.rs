use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Trait for measuring pagination performance.
///
/// This allows us to swap implementations. Without the "profiling" feature
/// the engine uses [`NoOpProfiler`], whose methods compile away.
pub trait Profiler: Send + Sync {
    /// Accumulates time spent in a named phase (`layout`, `overflow`, ...).
    fn record(&self, key: &str, duration: Duration);
    /// A cheap pre-check reported overflow.
    fn count_hit(&self);
    /// A cheap pre-check reported no overflow.
    fn count_miss(&self);
    /// One page pass finished.
    fn record_page(&self, duration: Duration);
    fn reset(&self);

    /// Average wall time of a page pass.
    fn get_avg_page_time(&self) -> Option<Duration>;

    fn log_summary(&self, _label: &str) {}
}

/// A no-op profiler for production use.
/// The compiler will inline these and eliminate the overhead.
pub struct NoOpProfiler;

impl Profiler for NoOpProfiler {
    #[inline(always)]
    fn record(&self, _key: &str, _duration: Duration) {}
    #[inline(always)]
    fn count_hit(&self) {}
    #[inline(always)]
    fn count_miss(&self) {}
    #[inline(always)]
    fn record_page(&self, _duration: Duration) {}
    #[inline(always)]
    fn reset(&self) {}
    #[inline(always)]
    fn get_avg_page_time(&self) -> Option<Duration> {
        None
    }
}

/// Real profiler implementation.
/// Only used when the "profiling" feature is enabled or for debugging.
pub struct DebugProfiler {
    stats: Mutex<HashMap<String, Duration>>,
    hits: AtomicUsize,
    misses: AtomicUsize,
    pages: AtomicUsize,
    /// Total page time in nanoseconds
    total_page_time_ns: AtomicU64,
}

impl DebugProfiler {
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(HashMap::new()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            pages: AtomicUsize::new(0),
            total_page_time_ns: AtomicU64::new(0),
        }
    }

    pub fn pages(&self) -> usize {
        self.pages.load(Ordering::Acquire)
    }

    /// Pages laid out per second of pass time.
    pub fn current_throughput(&self) -> f64 {
        let pages = self.pages.load(Ordering::Acquire);
        let time_ns = self.total_page_time_ns.load(Ordering::Acquire);
        if time_ns == 0 {
            return 0.0;
        }
        pages as f64 / (time_ns as f64 / 1_000_000_000.0)
    }
}

impl Default for DebugProfiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler for DebugProfiler {
    fn record(&self, key: &str, duration: Duration) {
        if let Ok(mut g) = self.stats.lock() {
            *g.entry(key.to_string()).or_default() += duration;
        }
    }

    fn count_hit(&self) {
        self.hits.fetch_add(1, Ordering::Release);
    }

    fn count_miss(&self) {
        self.misses.fetch_add(1, Ordering::Release);
    }

    fn record_page(&self, duration: Duration) {
        self.pages.fetch_add(1, Ordering::Release);
        // Saturating conversion to prevent overflow on very long durations
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        self.total_page_time_ns.fetch_add(nanos, Ordering::Release);
    }

    fn reset(&self) {
        if let Ok(mut g) = self.stats.lock() {
            g.clear();
        }
        self.hits.store(0, Ordering::Release);
        self.misses.store(0, Ordering::Release);
        self.pages.store(0, Ordering::Release);
        self.total_page_time_ns.store(0, Ordering::Release);
    }

    fn get_avg_page_time(&self) -> Option<Duration> {
        let pages = self.pages.load(Ordering::Acquire);
        if pages == 0 {
            return None;
        }
        let time_ns = self.total_page_time_ns.load(Ordering::Acquire);
        Some(Duration::from_nanos(time_ns / pages as u64))
    }

    fn log_summary(&self, label: &str) {
        let hits = self.hits.load(Ordering::Acquire);
        let misses = self.misses.load(Ordering::Acquire);
        let total = hits + misses;
        if total == 0 {
            return;
        }

        log::info!("=== Profile Summary ({}) ===", label);
        log::info!(
            "Overflow pre-checks: {} ({:.1}% positive)",
            total,
            (hits as f64 / total as f64) * 100.0
        );
        log::info!(
            "Throughput: {:.2} pages/sec ({} pages)",
            self.current_throughput(),
            self.pages()
        );

        if let Ok(stats) = self.stats.lock() {
            for (k, v) in stats.iter() {
                log::info!("{}: {:?}", k, v);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_profiler_averages_pages() {
        let profiler = DebugProfiler::new();
        assert_eq!(profiler.get_avg_page_time(), None);
        profiler.record_page(Duration::from_millis(2));
        profiler.record_page(Duration::from_millis(4));
        assert_eq!(profiler.get_avg_page_time(), Some(Duration::from_millis(3)));

        profiler.reset();
        assert_eq!(profiler.pages(), 0);
    }
}
