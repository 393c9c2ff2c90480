//! Rayon pool sizing and batch splitting for simulation sweeps.
//!
//! Independent (artifact, build) pairs share no mutable state, so hosts can
//! fan them out freely; this module only decides how many workers run and
//! where progress-report boundaries fall.

use rayon::ThreadPoolBuilder;

/// Configures how many worker threads evaluate a parallel sweep.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    /// Number of worker threads. 0 means the global Rayon pool (all cores).
    pub workers: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self { workers: 0 }
    }
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run `f` under this pool's worker count. With 0 workers the closure
    /// runs on the global Rayon pool; otherwise a temporary pool of the
    /// requested size is built for the call.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            f()
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .expect("Rayon thread pool");
            pool.install(f)
        }
    }
}

/// Split `total` items into up to `num_batches` contiguous `[start, end)`
/// ranges, as evenly as possible, earlier batches taking the remainder.
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;

    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for batch in 0..num_batches {
        let end = start + base + usize::from(batch < remainder);
        ranges.push((start, end));
        start = end;
    }
    ranges
}
