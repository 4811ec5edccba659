//! Pass progress accounting and cooperative cancellation.
//!
//! Worker threads batch their progress locally and fold it into one shared
//! counter, so the mutex is taken once per reporting interval rather than
//! once per record. Each fold yields a [`ProgressSnapshot`] that callers
//! can hand to an observer for display.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Point-in-time view of a running pass.
#[derive(Debug, Clone, Copy)]
pub struct ProgressSnapshot {
    pub completed: usize,
    pub total: usize,
    pub elapsed: Duration,
}

impl ProgressSnapshot {
    /// Projected total wall time, extrapolated linearly from the work
    /// completed so far. Zero until anything completes.
    pub fn projected(&self) -> Duration {
        if self.completed == 0 {
            return Duration::ZERO;
        }
        self.elapsed.mul_f64(self.total as f64 / self.completed as f64)
    }

    pub fn remaining(&self) -> Duration {
        self.projected().saturating_sub(self.elapsed)
    }
}

/// Observer invoked with each progress snapshot.
pub type ProgressFn = dyn Fn(ProgressSnapshot) + Send + Sync;

/// Shared progress counter for one pass.
pub struct PassProgress {
    total: usize,
    started: Instant,
    completed: Mutex<usize>,
}

impl PassProgress {
    pub fn start(total: usize) -> Self {
        Self {
            total,
            started: Instant::now(),
            completed: Mutex::new(0),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        *self.completed.lock().unwrap()
    }

    /// Folds a worker's local delta into the shared count and returns the
    /// resulting snapshot.
    pub fn note(&self, delta: usize) -> ProgressSnapshot {
        let mut completed = self.completed.lock().unwrap();
        *completed += delta;
        ProgressSnapshot {
            completed: *completed,
            total: self.total,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Shared cancellation flag, checked by workers between records.
///
/// Clones share the flag, so a token handed to the session can stop a pass
/// running on other threads.
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Rearms the token before a new pass starts.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}
