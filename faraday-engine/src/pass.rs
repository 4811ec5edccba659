//! Worker partitioning and the scoped-thread pass harness.

use std::ops::Range;
use std::thread;
use std::time::Duration;

/// Records scanned between progress reports in partitioned passes.
pub const REPORT_INTERVAL: usize = 500;
/// Records scanned between progress reports in serial statistics passes.
pub const SERIAL_REPORT_INTERVAL: usize = 2000;

/// How a pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Complete,
    /// Completed, but one or more worker threads failed to spawn and their
    /// partitions ran inline on the coordinator.
    Degraded,
    /// Stopped by the cancellation token; the output was discarded.
    Cancelled,
}

/// What a pass did. `kept` is the output cardinality: records written for
/// a filter, bin A size for a divide, records enriched for a statistics
/// pass.
#[derive(Debug, Clone, Copy)]
pub struct PassSummary {
    pub status: RunStatus,
    pub examined: usize,
    pub kept: usize,
    pub spawn_failures: usize,
    pub elapsed: Duration,
}

/// Resolves an operator-supplied worker count; 0 means one worker per
/// available core.
pub fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    } else {
        workers
    }
}

/// Splits `0..len` into `workers` equal partitions of `len / workers`
/// records plus a final partition holding the remainder. Empty partitions
/// are skipped; every index appears in exactly one returned range.
pub fn partition_ranges(len: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.max(1);
    let chunk = len / workers;
    let mut ranges = Vec::with_capacity(workers + 1);
    if chunk > 0 {
        for i in 0..workers {
            ranges.push(i * chunk..(i + 1) * chunk);
        }
    }
    let tail = len - len % workers;
    if tail < len {
        ranges.push(tail..len);
    }
    ranges
}

/// Runs `work` over every partition of `0..len`, one scoped worker thread
/// per partition. Partitions whose thread fails to spawn run inline on the
/// coordinator after the rest have launched. Returns the number of spawn
/// failures.
pub fn run_partitioned<F>(len: usize, workers: usize, work: &F) -> usize
where
    F: Fn(Range<usize>) + Sync,
{
    let ranges = partition_ranges(len, workers);
    let mut failed: Vec<Range<usize>> = Vec::new();
    thread::scope(|scope| {
        for range in &ranges {
            let spawned = thread::Builder::new().spawn_scoped(scope, {
                let range = range.clone();
                move || work(range)
            });
            if spawned.is_err() {
                failed.push(range.clone());
            }
        }
        for range in &failed {
            work(range.clone());
        }
    });
    failed.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn coverage(len: usize, workers: usize) -> Vec<usize> {
        let mut seen = vec![0usize; len];
        for range in partition_ranges(len, workers) {
            for i in range {
                seen[i] += 1;
            }
        }
        seen
    }

    #[test]
    fn every_index_covered_exactly_once() {
        for (len, workers) in [(10, 3), (100, 7), (5, 2), (1, 4), (0, 3), (12, 4)] {
            let seen = coverage(len, workers);
            assert!(
                seen.iter().all(|&n| n == 1),
                "len={} workers={} coverage={:?}",
                len,
                workers,
                seen
            );
        }
    }

    #[test]
    fn remainder_lands_in_final_partition() {
        let ranges = partition_ranges(10, 3);
        assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..10]);
    }

    #[test]
    fn exact_division_has_no_remainder_partition() {
        let ranges = partition_ranges(12, 4);
        assert_eq!(ranges, vec![0..3, 3..6, 6..9, 9..12]);
    }

    #[test]
    fn fewer_records_than_workers_yields_single_partition() {
        let ranges = partition_ranges(2, 8);
        assert_eq!(ranges, vec![0..2]);
    }

    #[test]
    fn run_partitioned_touches_every_index() {
        let len = 1003;
        let sum = AtomicUsize::new(0);
        let visits = Mutex::new(vec![0usize; len]);
        let failures = run_partitioned(len, 4, &|range| {
            for i in range {
                sum.fetch_add(i, Ordering::Relaxed);
                visits.lock().unwrap()[i] += 1;
            }
        });
        assert_eq!(failures, 0);
        assert_eq!(sum.load(Ordering::Relaxed), len * (len - 1) / 2);
        assert!(visits.lock().unwrap().iter().all(|&n| n == 1));
    }

    #[test]
    fn resolve_workers_expands_zero() {
        assert!(resolve_workers(0) >= 1);
        assert_eq!(resolve_workers(3), 3);
    }
}
