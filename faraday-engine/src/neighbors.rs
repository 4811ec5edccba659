//! Per-record neighborhood statistics on the rotation measure.
//!
//! Both estimators scan the whole active generation per record, excluding
//! the record itself. Results land in a side table first and are committed
//! to the catalog only when the full pass succeeds, so an aborted or
//! cancelled run leaves no partial state.

use std::cmp::Ordering;
use std::time::Instant;

use faraday_catalog::CatalogFamily;

use crate::error::{Error, Result};
use crate::pass::{PassSummary, RunStatus, SERIAL_REPORT_INTERVAL};
use crate::progress::{CancelToken, PassProgress, ProgressFn};

/// Scratch entries allowed per neighbor search, as a multiple of K.
const SCRATCH_FACTOR: usize = 15;

/// Which neighborhood estimator a statistics pass runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    /// Every source within a fixed angular threshold is a neighbor.
    Annulus { threshold_deg: f64 },
    /// The K nearest sources by angular distance, searched within a
    /// radius of `1.5·sqrt(K)` degrees.
    FixedK { k: usize },
}

struct AnnulusRow {
    count: u32,
    mean: f64,
}

struct FixedKRow {
    mean: f64,
    median: f64,
    sd: f64,
}

/// Recomputes the neighborhood fields of the family's active generation.
///
/// Serial, with progress reports every [`SERIAL_REPORT_INTERVAL`] records
/// and the cancellation token checked between records.
pub fn compute_neighbor_stats(
    family: &mut CatalogFamily,
    estimator: &Estimator,
    cancel: &CancelToken,
    observer: Option<&ProgressFn>,
) -> Result<PassSummary> {
    let started = Instant::now();
    let total = family.active().len();
    let progress = PassProgress::start(total);
    let status = match *estimator {
        Estimator::Annulus { threshold_deg } => {
            annulus_pass(family, threshold_deg, cancel, observer, &progress)
        }
        Estimator::FixedK { k } => fixed_k_pass(family, k, cancel, observer, &progress)?,
    };
    Ok(PassSummary {
        status,
        examined: progress.completed(),
        kept: if status == RunStatus::Complete { total } else { 0 },
        spawn_failures: 0,
        elapsed: started.elapsed(),
    })
}

fn report(
    progress: &PassProgress,
    observer: Option<&ProgressFn>,
    local: &mut usize,
) {
    *local += 1;
    if *local == SERIAL_REPORT_INTERVAL {
        let snapshot = progress.note(*local);
        *local = 0;
        if let Some(observer) = observer {
            observer(snapshot);
        }
    }
}

fn drain(progress: &PassProgress, observer: Option<&ProgressFn>, local: usize) {
    if local > 0 {
        let snapshot = progress.note(local);
        if let Some(observer) = observer {
            observer(snapshot);
        }
    }
}

fn annulus_pass(
    family: &mut CatalogFamily,
    threshold_deg: f64,
    cancel: &CancelToken,
    observer: Option<&ProgressFn>,
    progress: &PassProgress,
) -> RunStatus {
    let mut rows = Vec::with_capacity(family.active().len());
    {
        let records = family.active().records();
        let mut local = 0usize;
        for (i, target) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                return RunStatus::Cancelled;
            }
            let mut sum = 0.0;
            let mut count = 0u32;
            for (j, other) in records.iter().enumerate() {
                if j == i {
                    continue;
                }
                if target.separation_within(other, threshold_deg).is_some() {
                    sum += other.rm;
                    count += 1;
                }
            }
            // Isolated records get 0/0 = NaN; the NaN mean survives the
            // commit and later magnitude culls drop such records.
            rows.push(AnnulusRow {
                count,
                mean: sum / f64::from(count),
            });
            report(progress, observer, &mut local);
        }
        drain(progress, observer, local);
    }

    for (record, row) in family.active_mut().records_mut().iter_mut().zip(&rows) {
        record.neighbor_count = row.count;
        record.rm_mean = row.mean;
        record.rm_delta = record.rm - row.mean;
    }
    RunStatus::Complete
}

fn fixed_k_pass(
    family: &mut CatalogFamily,
    k: usize,
    cancel: &CancelToken,
    observer: Option<&ProgressFn>,
    progress: &PassProgress,
) -> Result<RunStatus> {
    if k == 0 {
        return Err(Error::Parse("fixed-K estimator requires K >= 1".into()));
    }
    let radius_deg = 1.5 * (k as f64).sqrt();
    let capacity = SCRATCH_FACTOR * k;
    let mut scratch: Vec<(f64, f64)> = Vec::with_capacity(capacity);
    let mut rows = Vec::with_capacity(family.active().len());
    {
        let records = family.active().records();
        let mut local = 0usize;
        for (i, target) in records.iter().enumerate() {
            if cancel.is_cancelled() {
                return Ok(RunStatus::Cancelled);
            }
            scratch.clear();
            for (j, other) in records.iter().enumerate() {
                if j == i {
                    continue;
                }
                if let Some(separation) = target.separation_within(other, radius_deg) {
                    if scratch.len() == capacity {
                        return Err(Error::NeighborOverflow { capacity });
                    }
                    scratch.push((separation, other.rm));
                }
            }
            if scratch.len() < k {
                return Err(Error::TooFewNeighbors {
                    found: scratch.len(),
                    required: k,
                });
            }
            scratch.sort_unstable_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
            rows.push(nearest_stats(&scratch[..k]));
            report(progress, observer, &mut local);
        }
        drain(progress, observer, local);
    }

    for (record, row) in family.active_mut().records_mut().iter_mut().zip(&rows) {
        record.rm_mean_nn = row.mean;
        record.rm_delta_nn = record.rm - row.mean;
        record.rm_sd_nn = row.sd;
        record.rm_median = row.median;
        record.rm_median_delta = record.rm - row.median;
    }
    Ok(RunStatus::Complete)
}

/// Statistics over the K nearest entries, already sorted by distance.
/// The median is the middle entry in distance order, the average of the
/// two middle entries for even K. Sample standard deviation, 0.0 for a
/// single neighbor.
fn nearest_stats(nearest: &[(f64, f64)]) -> FixedKRow {
    let k = nearest.len();
    let mean = nearest.iter().map(|p| p.1).sum::<f64>() / k as f64;
    let median = if k % 2 == 1 {
        nearest[k / 2].1
    } else {
        (nearest[k / 2].1 + nearest[k / 2 - 1].1) / 2.0
    };
    let sd = if k == 1 {
        0.0
    } else {
        let squares: f64 = nearest.iter().map(|p| (p.1 - mean) * (p.1 - mean)).sum();
        (squares / (k - 1) as f64).sqrt()
    };
    FixedKRow { mean, median, sd }
}
